//! Venue Swiper Component
//!
//! Two linked cards (details and rating) that swipe together, one dot strip
//! per card, and a map that follows the active venue.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use leptos_swipe::{bind_global_swipe, create_swipe_signals, dot_strip_offset, make_on_mousedown, make_on_touchstart, Carousel};

use crate::config::MapConfig;
use crate::map::{initial_center, sync_map, MapView, VenueMap};
use crate::models::{rating_stars, Venue};

/// Pointer-down on these never starts a drag
const SWIPE_GATE: &str = "button, input, a, .dots, .venue-map";

/// Dot row that keeps the active dot centered
#[component]
fn DotStrip(count: usize, #[prop(into)] active: Signal<usize>, resized: ReadSignal<u32>) -> impl IntoView {
    let dots_ref = NodeRef::<Div>::new();

    let offset = move || {
        resized.track();
        let width = dots_ref.get().map(|d| d.offset_width() as f64).unwrap_or(0.0);
        dot_strip_offset(active.get(), count, width)
    };

    view! {
        <div class="dots" node_ref=dots_ref>
            <div class="dots-inner" style:transform=move || format!("translateX({}px)", offset())>
                {(0..count)
                    .map(|i| view! { <span class:active=move || active.get() == i></span> })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Venue swiper
///
/// # Arguments
/// * `venues` - cards in order; `carousel` must have been built for the same length
/// * `carousel` - initial cursor
/// * `map_config` - tiles and zoom for the venue map
#[component]
pub fn VenueSwiper(venues: &'static [Venue], carousel: Carousel, map_config: MapConfig) -> impl IntoView {
    let carousel = RwSignal::new(carousel);
    let active = Signal::derive(move || carousel.with(|c| c.index()));
    let venue = move || venues[active.get()];
    let count = venues.len();

    let swipe = create_swipe_signals();
    let card_ref = NodeRef::<Div>::new();
    let map_ref = NodeRef::<Div>::new();
    let (resized, set_resized) = signal(0u32);

    let measure = move || card_ref.get_untracked().map(|c| c.offset_width() as f64).unwrap_or(0.0);

    bind_global_swipe(swipe, move |delta, width| {
        let mut next = carousel.get_untracked();
        if next.apply_swipe(delta, width) {
            log::debug!("venue {} of {}", next.index() + 1, next.count());
            carousel.set(next);
        }
    });

    // Map is optional: the swiper works without it
    let map: Rc<RefCell<Option<VenueMap>>> = Rc::new(RefCell::new(None));

    let attach = map.clone();
    Effect::new(move |attached: Option<bool>| {
        if attached == Some(true) {
            return true;
        }
        let Some(container) = map_ref.get() else {
            return false;
        };
        let Some(center) = initial_center(venues, active.get_untracked()) else {
            log::info!("no venue has coordinates; map skipped");
            return true;
        };
        match VenueMap::attach(&container, &map_config, center) {
            Ok(venue_map) => {
                *attach.borrow_mut() = Some(venue_map);
            }
            Err(e) => log::warn!("venue map unavailable: {}", e),
        }
        true
    });

    let follow = map.clone();
    Effect::new(move |_| {
        let current = venues[active.get()];
        if let Some(venue_map) = follow.borrow().as_ref() {
            sync_map(venue_map, &current);
        }
    });

    let resize_map = map;
    let _ = window_event_listener(ev::resize, move |_| {
        set_resized.update(|n| *n = n.wrapping_add(1));
        if let Some(venue_map) = resize_map.borrow().as_ref() {
            venue_map.invalidate();
        }
    });

    let content_transform = move || format!("translateX({}px)", swipe.offset());

    view! {
        <div class="venue-swiper">
            <div
                id="venue-details-card"
                class="venue-card"
                node_ref=card_ref
                style:background-image=move || format!("url('{}')", venue().image)
                on:mousedown=make_on_mousedown(swipe, SWIPE_GATE, measure)
                on:touchstart=make_on_touchstart(swipe, SWIPE_GATE, measure)
            >
                <div
                    class="card-content-wrapper"
                    class:is-swiping=move || swipe.is_dragging()
                    style:transform=content_transform
                >
                    <h3 class="venue-name">{move || venue().name}</h3>
                    <p class="venue-date">{move || venue().date_text}</p>
                </div>
                <DotStrip count=count active=active resized=resized/>
            </div>

            <div
                id="choose-venue-card"
                class="venue-card"
                on:mousedown=make_on_mousedown(swipe, SWIPE_GATE, measure)
                on:touchstart=make_on_touchstart(swipe, SWIPE_GATE, measure)
            >
                <div
                    class="card-content-wrapper"
                    class:is-swiping=move || swipe.is_dragging()
                    style:transform=content_transform
                >
                    <div class="rating">
                        {move || {
                            rating_stars(venue().rating)
                                .into_iter()
                                .map(|(glyph, filled)| view! { <span class:filled=filled>{glyph}</span> })
                                .collect_view()
                        }}
                    </div>
                    <p class="rating-text">{move || venue().rating_text}</p>
                    <div class="venue-icons">
                        <span class="venue-icon-1">{move || venue().icons.0}</span>
                        <span class="venue-icon-2">{move || venue().icons.1}</span>
                    </div>
                </div>
                <DotStrip count=count active=active resized=resized/>
            </div>

            <div class="venue-map" node_ref=map_ref></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_covers_nested_controls() {
        let gated: Vec<&str> = SWIPE_GATE.split(',').map(str::trim).collect();
        for control in ["button", "input", "a", ".dots", ".venue-map"] {
            assert!(gated.contains(&control), "{} should not start a drag", control);
        }
    }
}
