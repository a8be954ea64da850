//! Showcase App
//!
//! Mounts every widget whose host element is on the page, then binds the
//! page effects.

use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos_swipe::Carousel;
use web_sys::HtmlElement;

use crate::components::{AudioPlayer, CountdownPanel, ParticleField, PlaylistPlayer, ProjectModal, VenueSwiper};
use crate::config::ShowcaseConfig;
use crate::data::{PROJECTS, TRACKS, VENUES};
use crate::dom;
use crate::effects;
use crate::playback::Playlist;

const AUDIO_PLAYER_HOST: &str = "audio-player-root";
const MUSIC_PLAYER_HOST: &str = "music-player-root";
const COUNTDOWN_HOST: &str = "countdown-root";
const VENUE_SWIPER_HOST: &str = "venue-swiper-root";
const PROJECT_MODAL_HOST: &str = "project-modal-root";
const PARTICLE_FIELD_HOST: &str = "particle-field-root";

const DEFAULT_PARTICLE_COLOR: &str = "#ffffff";

fn host(id: &str) -> Option<HtmlElement> {
    let found = dom::by_id::<HtmlElement>(id);
    if found.is_none() {
        log::warn!("#{} not on page; widget skipped", id);
    }
    found
}

pub fn start(config: &ShowcaseConfig) {
    if let Some(root) = host(AUDIO_PLAYER_HOST) {
        let src = root.get_attribute("data-src").unwrap_or_else(|| config.player.default_src.clone());
        let initial_volume = config.player.initial_volume;
        mount_to(root, move || view! { <AudioPlayer src=src initial_volume=initial_volume/> }).forget();
    }

    if let Some(root) = host(MUSIC_PLAYER_HOST) {
        match Playlist::new(TRACKS.to_vec()) {
            Some(playlist) => {
                let (volume, hide_ms) = (config.player.initial_volume, config.player.auto_hide_ms);
                mount_to(root, move || {
                    view! { <PlaylistPlayer playlist=playlist initial_volume=volume auto_hide_ms=hide_ms/> }
                })
                .forget();
            }
            None => log::warn!("playlist is empty; music player skipped"),
        }
    }

    if let Some(root) = host(COUNTDOWN_HOST) {
        mount_to(root, CountdownPanel).forget();
    }

    if let Some(root) = host(VENUE_SWIPER_HOST) {
        match Carousel::new(VENUES.len()) {
            Some(carousel) => {
                let map_config = config.map.clone();
                mount_to(root, move || {
                    view! { <VenueSwiper venues=VENUES carousel=carousel map_config=map_config/> }
                })
                .forget();
            }
            None => log::warn!("no venues; swiper skipped"),
        }
    }

    if let Some(root) = host(PROJECT_MODAL_HOST) {
        mount_to(root, || view! { <ProjectModal projects=PROJECTS/> }).forget();
    }

    if let Some(root) = host(PARTICLE_FIELD_HOST) {
        let color = root
            .get_attribute("data-color")
            .unwrap_or_else(|| DEFAULT_PARTICLE_COLOR.to_string());
        let particles = config.particles.clone();
        mount_to(root, move || view! { <ParticleField config=particles color=color/> }).forget();
    }

    effects::bind_all(config);
}
