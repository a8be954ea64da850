//! Project Modal Component
//!
//! Details dialog for portfolio projects. Any element carrying
//! `data-project-id` opens it; close button, backdrop click and Escape
//! close it, and focus goes back to whatever opened it.

use leptos::ev;
use leptos::html::Button;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::data::find_project;
use crate::dom;
use crate::markdown::{parse_markdown, parse_markdown_inline};
use crate::models::Project;

const TRIGGER_ATTR: &str = "data-project-id";

/// Project id of the trigger an event started on, if any
fn trigger_id(ev: &web_sys::Event) -> Option<String> {
    ev.target()?
        .dyn_into::<web_sys::Element>()
        .ok()?
        .closest(&format!("[{}]", TRIGGER_ATTR))
        .ok()??
        .get_attribute(TRIGGER_ATTR)
}

fn refocus_trigger(id: &str) {
    let selector = format!("[{}=\"{}\"]", TRIGGER_ATTR, id);
    if let Some(trigger) = dom::query::<web_sys::HtmlElement>(&selector) {
        let _ = trigger.focus();
    }
}

#[component]
fn ProjectDetails(project: &'static Project) -> impl IntoView {
    view! {
        <h2 class="modal-title" inner_html=parse_markdown_inline(project.title)></h2>
        <ul class="modal-tags">
            {project.tags.iter().map(|tag| view! { <li class="tag">{*tag}</li> }).collect_view()}
        </ul>
        <div class="modal-description" inner_html=parse_markdown(project.description)></div>
        <div class="modal-actions">
            {match project.link {
                Some(href) => view! {
                    <a class="btn project-link" href=href target="_blank" rel="noopener noreferrer">"View project"</a>
                }.into_any(),
                None => view! { <span class="badge not-deployed">"Not deployed"</span> }.into_any(),
            }}
        </div>
    }
}

/// Project details modal
///
/// # Arguments
/// * `projects` - lookup table for `data-project-id` triggers
#[component]
pub fn ProjectModal(projects: &'static [Project]) -> impl IntoView {
    let shown = RwSignal::new(None::<&'static str>);
    let close_ref = NodeRef::<Button>::new();
    let is_open = move || shown.get().is_some();

    if let Some(document) = dom::document() {
        dom::listen(&document, "click", move |ev| {
            let Some(id) = trigger_id(&ev) else { return };
            match find_project(projects, &id) {
                Some(project) => {
                    ev.prevent_default();
                    shown.set(Some(project.id));
                }
                None => log::warn!("no project with id '{}'", id),
            }
        });
    }

    let _ = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && shown.get_untracked().is_some() {
            shown.set(None);
        }
    });

    // Focus follows the dialog: into it on open, back to the trigger on close
    Effect::new(move |previous: Option<Option<&'static str>>| {
        let current = shown.get();
        match (previous.flatten(), current) {
            (_, Some(_)) => {
                if let Some(button) = close_ref.get_untracked() {
                    let _ = button.focus();
                }
            }
            (Some(closed), None) => refocus_trigger(closed),
            (None, None) => {}
        }
        current
    });

    let on_backdrop = move |ev: web_sys::MouseEvent| {
        // only clicks on the backdrop itself, not inside the panel
        if ev.target() == ev.current_target() {
            shown.set(None);
        }
    };

    view! {
        <div
            id="project-modal"
            class="modal-overlay"
            class:open=is_open
            role="dialog"
            aria-modal="true"
            aria-hidden=move || if is_open() { "false" } else { "true" }
            inert=move || !is_open()
            on:click=on_backdrop
        >
            <div class="modal-panel">
                <button
                    class="modal-close"
                    aria-label="Close"
                    node_ref=close_ref
                    on:click=move |_| shown.set(None)
                >
                    "×"
                </button>
                {move || {
                    shown
                        .get()
                        .and_then(|id| find_project(projects, id))
                        .map(|project| view! { <ProjectDetails project=project/> })
                }}
            </div>
        </div>
    }
}
