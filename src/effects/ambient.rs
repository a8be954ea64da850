//! Ambient audio ducking
//!
//! Each `[data-audio]` section has a matching `<audio id="audio-KEY">`. The
//! track of the dominant section plays; switching sections cross-fades.
//! Silent until the first click or touch on the page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{HtmlElement, HtmlMediaElement};

use crate::config::AmbientConfig;
use crate::dom;
use crate::ducking::{dominant_index, AmbientMixer, MixCommand, SectionBox};
use crate::error::ShowcaseError;
use crate::fade::Fader;
use crate::media;
use crate::timer::FrameGate;

const SECTION_SELECTOR: &str = "[data-audio]";

struct AmbientTrack {
    media: HtmlMediaElement,
    fader: Fader,
}

struct Ambient {
    sections: Vec<(HtmlElement, String)>,
    tracks: HashMap<String, AmbientTrack>,
    mixer: RefCell<AmbientMixer>,
    config: AmbientConfig,
}

impl Ambient {
    fn dominant_key(&self) -> Option<&str> {
        let boxes: Vec<SectionBox> = self
            .sections
            .iter()
            .map(|(el, _)| {
                let rect = el.get_bounding_client_rect();
                SectionBox { top: rect.top(), height: rect.height() }
            })
            .collect();
        let (_, viewport_height) = dom::viewport();
        dominant_index(&boxes, viewport_height, self.config.metric).map(|i| self.sections[i].1.as_str())
    }

    fn apply(&self, commands: Vec<MixCommand>) {
        for command in commands {
            let (key, target) = match &command {
                MixCommand::FadeOut(key) => (key, 0.0),
                MixCommand::FadeIn(key) => (key, self.config.target_volume),
            };
            match self.tracks.get(key) {
                Some(track) => {
                    log::debug!("ambient {:?}", command);
                    track
                        .fader
                        .fade_to(&track.media, target, self.config.fade_steps, self.config.step_ms());
                }
                None => log::debug!("no ambient track for '{}'", key),
            }
        }
    }

    fn on_scroll(&self) {
        let dominant = self.dominant_key().map(str::to_string);
        let commands = self.mixer.borrow_mut().observe(dominant.as_deref());
        self.apply(commands);
    }

    fn unlock(&self) {
        let dominant = self.dominant_key().map(str::to_string);
        let commands = {
            let mut mixer = self.mixer.borrow_mut();
            mixer.observe(dominant.as_deref());
            match mixer.unlock() {
                Some(commands) => commands,
                None => return,
            }
        };

        // The track about to fade in is started by its fade; priming it would pause it
        let fading_in: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                MixCommand::FadeIn(key) => Some(key.as_str()),
                MixCommand::FadeOut(_) => None,
            })
            .collect();
        for (key, track) in &self.tracks {
            if !fading_in.contains(&key.as_str()) {
                let (fader, media) = (track.fader.clone(), track.media.clone());
                media::prime(&track.media, move || fader.is_silent(&media));
            }
        }

        log::info!("audio unlocked; scroll-driven ambient audio active");
        self.apply(commands);
    }
}

pub fn bind(config: &AmbientConfig) -> Result<(), ShowcaseError> {
    let sections: Vec<(HtmlElement, String)> = dom::query_all::<HtmlElement>(None, SECTION_SELECTOR)
        .into_iter()
        .filter_map(|el| {
            let key = el.get_attribute("data-audio")?;
            Some((el, key))
        })
        .collect();
    if sections.is_empty() {
        return Err(ShowcaseError::MissingElement(SECTION_SELECTOR.to_string()));
    }
    let body = dom::document()
        .and_then(|d| d.body())
        .ok_or_else(|| ShowcaseError::MissingElement("body".to_string()))?;

    let mut tracks = HashMap::new();
    for (_, key) in &sections {
        if tracks.contains_key(key) {
            continue;
        }
        match dom::by_id::<HtmlMediaElement>(&format!("audio-{}", key)) {
            Some(media) => {
                media.set_volume(0.0);
                tracks.insert(key.clone(), AmbientTrack { media, fader: Fader::default() });
            }
            None => log::warn!("section '{}' has no #audio-{} element", key, key),
        }
    }

    let ambient = Rc::new(Ambient {
        sections,
        tracks,
        mixer: RefCell::new(AmbientMixer::default()),
        config: config.clone(),
    });
    ambient.on_scroll();

    let gate = FrameGate::default();
    let scrolling = ambient.clone();
    dom::listen_window("scroll", move |_| {
        let ambient = scrolling.clone();
        gate.schedule(move || ambient.on_scroll());
    });

    for event in ["click", "touchstart"] {
        let ambient = ambient.clone();
        dom::listen(&body, event, move |_| {
            if !ambient.mixer.borrow().is_unlocked() {
                ambient.unlock();
            }
        });
    }

    log::debug!("ambient audio bound to {} sections", ambient.sections.len());
    Ok(())
}
