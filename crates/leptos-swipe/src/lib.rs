//! Leptos Swipe Utilities
//!
//! Horizontal swipe gestures for card carousels using mouse and touch events.
//! A release only changes the index once the drag passes a width-relative threshold.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Dot width in pixels
pub const DOT_WIDTH: f64 = 8.0;
/// Margin on one side of a dot in pixels
pub const DOT_MARGIN: f64 = 4.0;
/// Horizontal space taken by one dot including both margins
pub const DOT_SLOT: f64 = DOT_WIDTH + DOT_MARGIN * 2.0;

/// Fraction of the card width a drag has to exceed
const THRESHOLD_RATIO: f64 = 0.25;

/// Resolve a finished drag into the next active index.
///
/// The threshold is strict: a drag of exactly a quarter of the card width
/// leaves the index where it was.
pub fn resolve_swipe(delta_x: f64, card_width: f64, index: usize, len: usize) -> usize {
    let threshold = card_width * THRESHOLD_RATIO;
    if delta_x < -threshold && index + 1 < len {
        index + 1
    } else if delta_x > threshold && index > 0 {
        index - 1
    } else {
        index
    }
}

/// Translation of a dot strip so the active dot sits in the middle of its container.
///
/// Clamped so the strip never scrolls past its own edges. A strip narrower
/// than the container is centered statically.
pub fn dot_strip_offset(active: usize, count: usize, container_width: f64) -> f64 {
    let strip_width = count as f64 * DOT_SLOT;
    if strip_width < container_width {
        return (container_width - strip_width) / 2.0;
    }
    let active_center = active as f64 * DOT_SLOT + DOT_WIDTH / 2.0 + DOT_MARGIN;
    let min_translate = container_width - strip_width;
    (container_width / 2.0 - active_center).clamp(min_translate, 0.0)
}

/// Cursor over a non-empty list of cards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// Returns None for an empty list
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cards, at least one
    pub fn count(&self) -> usize {
        self.len
    }

    /// Apply a finished drag. Returns true when the active index changed.
    pub fn apply_swipe(&mut self, delta_x: f64, card_width: f64) -> bool {
        let next = resolve_swipe(delta_x, card_width, self.index, self.len);
        let changed = next != self.index;
        self.index = next;
        changed
    }
}

/// Swipe session signals
#[derive(Clone, Copy)]
pub struct SwipeSignals {
    pub dragging_read: ReadSignal<bool>,
    dragging_write: WriteSignal<bool>,
    /// Pointer X at pointer-down
    start_x_read: ReadSignal<f64>,
    start_x_write: WriteSignal<f64>,
    /// Latest pointer X while dragging
    current_x_read: ReadSignal<f64>,
    current_x_write: WriteSignal<f64>,
    /// Card width measured when the drag started
    width_read: ReadSignal<f64>,
    width_write: WriteSignal<f64>,
}

pub fn create_swipe_signals() -> SwipeSignals {
    let (dragging_read, dragging_write) = signal(false);
    let (start_x_read, start_x_write) = signal(0.0f64);
    let (current_x_read, current_x_write) = signal(0.0f64);
    let (width_read, width_write) = signal(0.0f64);
    SwipeSignals {
        dragging_read,
        dragging_write,
        start_x_read,
        start_x_write,
        current_x_read,
        current_x_write,
        width_read,
        width_write,
    }
}

impl SwipeSignals {
    /// Live horizontal drag offset, 0 when idle (tracked)
    pub fn offset(&self) -> f64 {
        if self.dragging_read.get() {
            self.current_x_read.get() - self.start_x_read.get()
        } else {
            0.0
        }
    }

    /// Whether a drag is in progress (tracked)
    pub fn is_dragging(&self) -> bool {
        self.dragging_read.get()
    }

    fn begin(&self, x: f64, card_width: f64) {
        self.start_x_write.set(x);
        self.current_x_write.set(x);
        self.width_write.set(card_width);
        self.dragging_write.set(true);
    }

    fn track(&self, x: f64) {
        self.current_x_write.set(x);
    }

    /// End the session, returning (delta, card width) if one was active
    fn finish(&self) -> Option<(f64, f64)> {
        if !self.dragging_read.get_untracked() {
            return None;
        }
        let delta = self.current_x_read.get_untracked() - self.start_x_read.get_untracked();
        let width = self.width_read.get_untracked();
        self.dragging_write.set(false);
        self.start_x_write.set(0.0);
        self.current_x_write.set(0.0);
        Some((delta, width))
    }
}

/// True when the event started on (or inside) an element matching `selector`
pub fn is_gated(target: Option<web_sys::EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

fn first_touch_x(ev: &web_sys::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|t| t.client_x() as f64)
}

fn pointer_x(ev: &web_sys::Event) -> Option<f64> {
    if let Some(mouse) = ev.dyn_ref::<web_sys::MouseEvent>() {
        return Some(mouse.client_x() as f64);
    }
    ev.dyn_ref::<web_sys::TouchEvent>().and_then(first_touch_x)
}

/// Create mousedown handler for a swipeable card.
/// `measure` returns the card's current rendered width.
pub fn make_on_mousedown<M>(
    swipe: SwipeSignals,
    gate: &'static str,
    measure: M,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    M: Fn() -> f64 + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_gated(ev.target(), gate) {
            return;
        }
        // Avoid text selection and native image drag
        ev.prevent_default();
        swipe.begin(ev.client_x() as f64, measure());
    }
}

/// Create touchstart handler for a swipeable card
pub fn make_on_touchstart<M>(
    swipe: SwipeSignals,
    gate: &'static str,
    measure: M,
) -> impl Fn(web_sys::TouchEvent) + Clone + 'static
where
    M: Fn() -> f64 + Clone + 'static,
{
    move |ev: web_sys::TouchEvent| {
        if is_gated(ev.target(), gate) {
            return;
        }
        if let Some(x) = first_touch_x(&ev) {
            swipe.begin(x, measure());
        }
    }
}

/// Bind document-level move/release listeners for a swipe session.
/// `on_release` receives the final (delta, card width) of each finished drag.
pub fn bind_global_swipe<F>(swipe: SwipeSignals, on_release: F)
where
    F: Fn(f64, f64) + 'static,
{
    let on_move = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if !swipe.dragging_read.get_untracked() {
            return;
        }
        if let Some(x) = pointer_x(&ev) {
            swipe.track(x);
        }
    });

    let on_end = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if let Some((delta, width)) = swipe.finish() {
            on_release(delta, width);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = doc.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_move.as_ref().unchecked_ref(),
            &opts,
        );
        for name in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            let _ = doc.add_event_listener_with_callback(name, on_end.as_ref().unchecked_ref());
        }
    }
    on_move.forget();
    on_end.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_threshold_keeps_index() {
        // 400px card -> 100px threshold
        assert_eq!(resolve_swipe(-100.0, 400.0, 1, 4), 1);
        assert_eq!(resolve_swipe(100.0, 400.0, 1, 4), 1);
    }

    #[test]
    fn test_one_pixel_past_threshold_moves() {
        assert_eq!(resolve_swipe(-101.0, 400.0, 1, 4), 2);
        assert_eq!(resolve_swipe(101.0, 400.0, 1, 4), 0);
    }

    #[test]
    fn test_swipe_stays_in_bounds() {
        assert_eq!(resolve_swipe(300.0, 400.0, 0, 4), 0);
        assert_eq!(resolve_swipe(-300.0, 400.0, 3, 4), 3);
        assert_eq!(resolve_swipe(-300.0, 400.0, 0, 1), 0);
    }

    #[test]
    fn test_carousel_walks_both_ways() {
        let mut c = Carousel::new(3).unwrap();
        assert!(c.apply_swipe(-200.0, 400.0));
        assert!(c.apply_swipe(-200.0, 400.0));
        assert_eq!(c.index(), 2);
        assert!(!c.apply_swipe(-200.0, 400.0));
        assert!(c.apply_swipe(200.0, 400.0));
        assert_eq!(c.index(), 1);
        assert!(!c.apply_swipe(20.0, 400.0));
    }

    #[test]
    fn test_empty_carousel_is_rejected() {
        assert!(Carousel::new(0).is_none());
        assert_eq!(Carousel::new(4).map(|c| c.count()), Some(4));
    }

    #[test]
    fn test_dot_strip_centers_active_dot() {
        // 10 dots = 160px strip in a 64px container
        // dot 5 center = 5*16 + 4 + 4 = 88 -> 32 - 88 = -56
        assert_eq!(dot_strip_offset(5, 10, 64.0), -56.0);
    }

    #[test]
    fn test_dot_strip_clamps_to_edges() {
        assert_eq!(dot_strip_offset(0, 10, 64.0), 0.0);
        // min translate = 64 - 160 = -96
        assert_eq!(dot_strip_offset(9, 10, 64.0), -96.0);
    }

    #[test]
    fn test_short_strip_is_centered() {
        // 4 dots = 64px strip in a 100px container
        assert_eq!(dot_strip_offset(0, 4, 100.0), 18.0);
        assert_eq!(dot_strip_offset(3, 4, 100.0), 18.0);
    }

    #[test]
    fn test_event_without_target_is_not_gated() {
        assert!(!is_gated(None, "button, input, a"));
    }
}
