//! UI Components
//!
//! Leptos widgets, each mounted into its own host element.

mod audio_player;
mod countdown_panel;
mod particle_field;
mod playlist_player;
mod project_modal;
mod venue_swiper;

pub use audio_player::AudioPlayer;
pub use countdown_panel::CountdownPanel;
pub use particle_field::ParticleField;
pub use playlist_player::PlaylistPlayer;
pub use project_modal::ProjectModal;
pub use venue_swiper::VenueSwiper;
