//! Page Effects
//!
//! Imperative behavior bound to markup the page already has. An effect
//! whose elements are missing is skipped; the rest still bind.

mod ambient;
mod checklist;
mod legacy;
mod parallax;
mod reveal;

use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;

fn report(name: &str, result: Result<(), ShowcaseError>) {
    match result {
        Ok(()) => log::debug!("{} ready", name),
        Err(e) => log::warn!("{} skipped: {}", name, e),
    }
}

pub fn bind_all(config: &ShowcaseConfig) {
    report("legacy cross-fade", legacy::bind(&config.legacy));
    report("ambient audio", ambient::bind(&config.ambient));
    report("hero parallax", parallax::bind(&config.parallax));
    report("scroll visuals", parallax::bind_scroll_visuals(&config.parallax));
    report("checklist", checklist::bind());

    for (selector, class, threshold) in [(".fade-in", "is-visible", 0.1), (".resume-block", "visible", 0.3)] {
        match reveal::bind_reveal(selector, class, threshold) {
            Ok(n) => log::debug!("reveal: {} x {}", n, selector),
            Err(e) => log::warn!("reveal for {} skipped: {}", selector, e),
        }
    }
    let links = reveal::bind_smooth_scroll();
    log::debug!("smooth scroll: {} links", links);
}
