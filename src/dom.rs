//! DOM Helpers
//!
//! Thin lookups and mutations over `web_sys` used by the page-level effects.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::ShowcaseError;

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Element by id, cast to the requested type
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Like `by_id`, but a missing element is an error
pub fn require_id<T: JsCast>(id: &str) -> Result<T, ShowcaseError> {
    by_id(id).ok_or_else(|| ShowcaseError::MissingElement(format!("#{}", id)))
}

/// First element matching `selector`, cast to the requested type
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?.query_selector(selector).ok()??.dyn_into::<T>().ok()
}

/// Like `query`, but a missing element is an error
pub fn require<T: JsCast>(selector: &str) -> Result<T, ShowcaseError> {
    query(selector).ok_or_else(|| ShowcaseError::MissingElement(selector.to_string()))
}

/// All elements matching `selector` under `root` (the document if None)
/// that cast to the requested type
pub fn query_all<T: JsCast>(root: Option<&web_sys::Element>, selector: &str) -> Vec<T> {
    let list = match root {
        Some(el) => el.query_selector_all(selector).ok(),
        None => document().and_then(|d| d.query_selector_all(selector).ok()),
    };
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_style(el: &web_sys::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Viewport (width, height) in CSS pixels
pub fn viewport() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn scroll_y() -> f64 {
    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Milliseconds since page load
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Blocking user notice
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Attach a listener for the lifetime of the page
pub fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("could not listen for '{}': {:?}", event, e);
    }
    closure.forget();
}

/// Attach a listener to the window for the lifetime of the page
pub fn listen_window<F>(event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    if let Some(window) = web_sys::window() {
        listen(&window, event, handler);
    }
}
