//! Particle Field Component
//!
//! Decorative canvas of drifting or clustered dots, redrawn every
//! animation frame until the canvas leaves the document.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::ParticleConfig;
use crate::dom;
use crate::particles::{advance_all, spawn, Particle};

/// Frame gaps longer than this (tab in background) are not simulated
const MAX_STEP_SECS: f64 = 0.1;

struct FieldState {
    particles: Vec<Particle>,
    last_frame_ms: Option<f64>,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Match the backing store to the displayed size. False while the canvas has no area.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width() as u32, rect.height() as u32);
    if w == 0 || h == 0 {
        return None;
    }
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
    }
    Some((w as f64, h as f64))
}

fn draw(ctx: &CanvasRenderingContext2d, particles: &[Particle], (w, h): (f64, f64), t_secs: f64, color: &str) {
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str(color);
    for p in particles {
        ctx.set_global_alpha(p.pulse_opacity(t_secs));
        ctx.begin_path();
        let _ = ctx.arc(p.x * w, p.y * h, p.size / 2.0, 0.0, TAU);
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}

fn run_frames(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, state: Rc<RefCell<FieldState>>, color: Rc<str>) {
    request_animation_frame(move || {
        if !canvas.is_connected() {
            log::debug!("particle field detached; animation stopped");
            return;
        }
        let now = dom::now_ms();
        if let Some(size) = fit_canvas(&canvas) {
            let mut field = state.borrow_mut();
            let dt = field
                .last_frame_ms
                .map(|last| ((now - last) / 1000.0).min(MAX_STEP_SECS))
                .unwrap_or(0.0);
            field.last_frame_ms = Some(now);
            advance_all(&mut field.particles, dt);
            draw(&ctx, &field.particles, size, now / 1000.0, &color);
        }
        run_frames(canvas, ctx, state, color);
    });
}

/// Particle field
///
/// # Arguments
/// * `config` - count, placement mode and ranges
/// * `color` - CSS fill color of the dots
#[component]
pub fn ParticleField(config: ParticleConfig, #[prop(into)] color: String) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let color: Rc<str> = Rc::from(color);

    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(canvas) = canvas_ref.get() else {
            return false;
        };
        let Some(ctx) = context_2d(&canvas) else {
            log::warn!("particle field: no 2d context");
            return true;
        };
        let mut rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
        let state = Rc::new(RefCell::new(FieldState {
            particles: spawn(&config, &mut rng),
            last_frame_ms: None,
        }));
        log::debug!("particle field: {} particles", config.count);
        run_frames(canvas, ctx, state, color.clone());
        true
    });

    view! { <canvas class="particle-field" node_ref=canvas_ref aria-hidden="true"></canvas> }
}
