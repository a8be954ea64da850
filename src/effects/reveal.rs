//! Reveal on scroll and smooth anchor scrolling

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::ShowcaseError;

/// Add `class` to each `selector` element once `threshold` of it is visible.
/// Each element is revealed once, then no longer observed.
pub fn bind_reveal(selector: &str, class: &'static str, threshold: f64) -> Result<usize, ShowcaseError> {
    let targets = dom::query_all::<Element>(None, selector);
    if targets.is_empty() {
        return Ok(0);
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let _ = target.class_list().add_1(class);
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    Ok(targets.len())
}

/// In-page links scroll smoothly to their target. Links to missing targets
/// keep their default behavior.
pub fn bind_smooth_scroll() -> usize {
    let anchors = dom::query_all::<Element>(None, "a[href^=\"#\"]");
    for anchor in &anchors {
        let Some(href) = anchor.get_attribute("href") else { continue };
        if href.len() < 2 {
            continue;
        }
        dom::listen(anchor, "click", move |ev| {
            let Some(target) = dom::query::<Element>(&href) else {
                log::debug!("no scroll target for '{}'", href);
                return;
            };
            ev.prevent_default();
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
    anchors.len()
}
