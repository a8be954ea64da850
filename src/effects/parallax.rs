//! Hero parallax, idle drift and scroll visuals
//!
//! Pointer movement shifts `[data-depth]` layers inside `#hero`. After a
//! few seconds without pointer input the layers drift on their own until
//! the pointer moves again. Separately, `.scroll-visual-asset` elements
//! slide with the scroll position relative to `#about`.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::request_animation_frame;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::ParallaxConfig;
use crate::dom;
use crate::error::ShowcaseError;
use crate::parallax::{
    depth_translation, drift_step, drift_translation, parallax_enabled, parse_factor, pointer_offset,
    scroll_translation, translate3d, DriftStep,
};
use crate::timer::{Delayed, FrameGate};

struct Layer {
    el: HtmlElement,
    factor: f64,
}

fn layers(root: Option<&web_sys::Element>, selector: &str, attr: &str) -> Vec<Layer> {
    dom::query_all::<HtmlElement>(root, selector)
        .into_iter()
        .map(|el| {
            let factor = parse_factor(el.get_attribute(attr).as_deref());
            Layer { el, factor }
        })
        .collect()
}

struct Hero {
    section: HtmlElement,
    layers: Vec<Layer>,
    config: ParallaxConfig,
    pointer: Cell<(f64, f64)>,
    drifting: Cell<bool>,
    idle: Delayed,
}

impl Hero {
    fn enabled(&self) -> bool {
        parallax_enabled(dom::viewport().0, self.config.breakpoint)
    }

    fn follow_pointer(&self) {
        if !self.enabled() {
            return;
        }
        let rect = self.section.get_bounding_client_rect();
        let center = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
        let offset = pointer_offset(self.pointer.get(), center, self.config.divisor);
        for layer in &self.layers {
            dom::set_style(&layer.el, "transform", &translate3d(depth_translation(offset, layer.factor)));
        }
    }

    fn drift_frame(&self, t_ms: f64) {
        for layer in &self.layers {
            let shift = drift_translation(t_ms, layer.factor, self.config.drift_amplitude, self.config.drift_speed);
            dom::set_style(&layer.el, "transform", &translate3d(shift));
        }
    }

    /// Restart the idle countdown that leads into drifting
    fn arm_idle(self: &Rc<Self>) {
        let hero = Rc::downgrade(self);
        self.idle.schedule(self.config.idle_ms, move || {
            if let Some(hero) = hero.upgrade() {
                hero.start_drift();
            }
        });
    }

    fn start_drift(self: &Rc<Self>) {
        if !self.enabled() {
            self.arm_idle();
            return;
        }
        if self.drifting.replace(true) {
            return;
        }
        log::debug!("hero idle; drifting");
        drift_loop(self.clone());
    }
}

fn drift_loop(hero: Rc<Hero>) {
    request_animation_frame(move || {
        match drift_step(hero.drifting.get(), dom::viewport().0, hero.config.breakpoint) {
            DriftStep::Render => {
                hero.drift_frame(dom::now_ms());
                drift_loop(hero);
            }
            DriftStep::Stop => {}
            DriftStep::Suspend => {
                hero.drifting.set(false);
                hero.arm_idle();
            }
        }
    });
}

pub fn bind(config: &ParallaxConfig) -> Result<(), ShowcaseError> {
    let section = dom::require_id::<HtmlElement>("hero")?;
    let layers = layers(Some(&section), "[data-depth]", "data-depth");
    if layers.is_empty() {
        return Err(ShowcaseError::MissingElement("#hero [data-depth]".to_string()));
    }

    let hero = Rc::new(Hero {
        section,
        layers,
        config: config.clone(),
        pointer: Cell::new((0.0, 0.0)),
        drifting: Cell::new(false),
        idle: Delayed::default(),
    });
    hero.arm_idle();

    let gate = FrameGate::default();
    let tracking = hero.clone();
    dom::listen_window("mousemove", move |ev| {
        let Some(mouse) = ev.dyn_ref::<web_sys::MouseEvent>() else { return };
        tracking.pointer.set((mouse.client_x() as f64, mouse.client_y() as f64));
        tracking.drifting.set(false);
        tracking.arm_idle();
        let hero = tracking.clone();
        gate.schedule(move || hero.follow_pointer());
    });

    log::debug!("hero parallax bound to {} layers", hero.layers.len());
    Ok(())
}

pub fn bind_scroll_visuals(config: &ParallaxConfig) -> Result<(), ShowcaseError> {
    let section = dom::require_id::<HtmlElement>("about")?;
    let assets = layers(None, ".scroll-visual-asset", "data-scroll-speed");
    if assets.is_empty() {
        return Err(ShowcaseError::MissingElement(".scroll-visual-asset".to_string()));
    }
    let breakpoint = config.breakpoint;

    let update = Rc::new(move || {
        if !parallax_enabled(dom::viewport().0, breakpoint) {
            return;
        }
        let scroll_y = dom::scroll_y();
        let section_top = section.offset_top() as f64;
        for asset in &assets {
            let dy = scroll_translation(scroll_y, section_top, asset.factor);
            dom::set_style(&asset.el, "transform", &format!("translateY({}px)", dy));
        }
    });
    update();

    let gate = FrameGate::default();
    dom::listen_window("scroll", move |_| {
        let update = update.clone();
        gate.schedule(move || update());
    });
    Ok(())
}
