//! Legacy section cross-fade
//!
//! Three scenes (video plus text overlay) stacked in a pinned section,
//! blended by how far the section has been scrolled through.

use std::rc::Rc;

use web_sys::{HtmlElement, HtmlMediaElement};

use crate::config::LegacyConfig;
use crate::crossfade::{CrossfadeFrame, SectionRect};
use crate::dom;
use crate::error::ShowcaseError;
use crate::media;
use crate::timer::FrameGate;

struct Scene {
    overlay: HtmlElement,
    video: Option<HtmlMediaElement>,
}

impl Scene {
    fn apply(&self, opacity: f64, z_index: u8) {
        let opacity = opacity.to_string();
        let z_index = z_index.to_string();
        dom::set_style(&self.overlay, "opacity", &opacity);
        dom::set_style(&self.overlay, "z-index", &z_index);
        if let Some(video) = &self.video {
            dom::set_style(video, "opacity", &opacity);
            dom::set_style(video, "z-index", &z_index);
        }
    }
}

struct LegacyView {
    section: HtmlElement,
    scenes: Vec<Scene>,
    vignettes: Vec<HtmlElement>,
    vignette_max: f64,
}

impl LegacyView {
    fn update(&self) {
        let rect = self.section.get_bounding_client_rect();
        let section = SectionRect { top: rect.top(), height: rect.height() };
        let (_, viewport_height) = dom::viewport();
        if section.is_offscreen(viewport_height) {
            return;
        }
        let frame = CrossfadeFrame::at(section.progress(viewport_height), self.vignette_max);
        for (i, scene) in self.scenes.iter().enumerate() {
            scene.apply(frame.opacities[i], frame.z_index(i));
        }

        let width = format!("{}%", frame.vignette_pct);
        for bar in &self.vignettes {
            dom::set_style(bar, "width", &width);
        }
        if let Some(last) = self.scenes.last() {
            dom::set_style(&last.overlay, "padding-left", &width);
            dom::set_style(&last.overlay, "padding-right", &width);
        }
    }
}

pub fn bind(config: &LegacyConfig) -> Result<(), ShowcaseError> {
    let section = dom::require::<HtmlElement>(".legacy-section")?;
    let scenes = config
        .scenes
        .iter()
        .map(|key| {
            Ok(Scene {
                overlay: dom::require(&format!(".legacy-content-wrapper.{}", key))?,
                video: dom::query(&format!(".legacy-video.{}", key)),
            })
        })
        .collect::<Result<Vec<_>, ShowcaseError>>()?;
    let vignettes = dom::query_all::<HtmlElement>(None, ".vignette-bar");

    for video in scenes.iter().filter_map(|s| s.video.as_ref()) {
        video.set_muted(true);
        let video = video.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = media::play(&video).await {
                log::debug!("legacy video did not start: {}", e);
            }
        });
    }

    let view = Rc::new(LegacyView {
        section,
        scenes,
        vignettes,
        vignette_max: config.vignette_max,
    });
    view.update();

    let gate = FrameGate::default();
    dom::listen_window("scroll", move |_| {
        let view = view.clone();
        gate.schedule(move || view.update());
    });

    log::debug!("legacy cross-fade bound");
    Ok(())
}
