//! Playlist Player Component
//!
//! Floating vinyl player over a fixed track list. The panel hides itself a
//! few seconds after the last interaction while music is playing.

use leptos::html::Audio;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::media;
use crate::models::Track;
use crate::playback::{DeckEvent, DeckState, HideAction, Playlist};
use crate::timer::Delayed;

/// Shared handles behind every control of the player
#[derive(Clone)]
struct Deck {
    audio: NodeRef<Audio>,
    playlist: RwSignal<Playlist<Track>>,
    playing: RwSignal<bool>,
    closed: RwSignal<bool>,
    loaded: RwSignal<bool>,
    hide: Delayed,
    hide_ms: u32,
}

impl Deck {
    fn load(&self) {
        let Some(audio) = self.audio.get_untracked() else { return };
        let track = self.playlist.with_untracked(|p| *p.current());
        audio.set_src(track.src);
        audio.load();
        self.loaded.set(true);
        log::debug!("loaded '{}'", track.name);
    }

    fn play(&self) {
        let Some(audio) = self.audio.get_untracked() else { return };
        if !self.loaded.get_untracked() {
            self.load();
        }
        let deck = self.clone();
        spawn_local(async move {
            match media::play(&audio).await {
                Ok(()) => {
                    deck.closed.set(false);
                    deck.apply(DeckEvent::Started);
                }
                Err(e) => {
                    log::warn!("playback prevented: {}", e);
                    deck.apply(DeckEvent::Rejected);
                }
            }
        });
    }

    fn pause(&self) {
        if let Some(audio) = self.audio.get_untracked() {
            let _ = audio.pause();
        }
        self.apply(DeckEvent::Paused);
    }

    fn toggle_play(&self) {
        if self.playing.get_untracked() {
            self.pause();
        } else {
            self.play();
        }
    }

    fn skip(&self, forward: bool) {
        self.playlist.update(|p| {
            if forward {
                p.next();
            } else {
                p.prev();
            }
        });
        self.load();
        if self.playing.get_untracked() {
            self.play();
        }
    }

    /// Update the play state and the pending auto-hide for `event`
    fn apply(&self, event: DeckEvent) {
        let mut state = DeckState { playing: self.playing.get_untracked() };
        let action = state.on(event);
        if state.playing != self.playing.get_untracked() {
            self.playing.set(state.playing);
        }
        match action {
            HideAction::Reschedule => {
                let closed = self.closed;
                self.hide.schedule(self.hide_ms, move || closed.set(true));
            }
            HideAction::Cancel => self.hide.cancel(),
        }
    }

    fn reset_hide(&self) {
        self.apply(DeckEvent::Interacted);
    }

    fn toggle_panel(&self) {
        if self.closed.get_untracked() {
            self.closed.set(false);
            if !self.loaded.get_untracked() {
                self.load();
            }
            self.reset_hide();
        } else {
            self.closed.set(true);
            self.apply(DeckEvent::PanelClosed);
        }
    }
}

/// Playlist player
///
/// # Arguments
/// * `tracks` - playlist in order; must not be empty
/// * `initial_volume` - starting gain, 0.0 to 1.0
/// * `auto_hide_ms` - idle time before the panel closes while playing
#[component]
pub fn PlaylistPlayer(playlist: Playlist<Track>, initial_volume: f64, auto_hide_ms: u32) -> impl IntoView {
    let deck = Deck {
        audio: NodeRef::new(),
        playlist: RwSignal::new(playlist),
        playing: RwSignal::new(false),
        closed: RwSignal::new(false),
        loaded: RwSignal::new(false),
        hide: Delayed::default(),
        hide_ms: auto_hide_ms,
    };
    let (volume, set_volume) = signal(initial_volume.clamp(0.0, 1.0));

    let audio_ref = deck.audio;
    let playlist = deck.playlist;
    let playing = deck.playing;
    let closed = deck.closed;

    Effect::new(move |_| {
        let gain = volume.get();
        if let Some(audio) = audio_ref.get() {
            audio.set_volume(gain);
        }
    });

    // First track is loaded and tried once the element exists
    let autoplay = deck.clone();
    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        if audio_ref.get().is_none() {
            return false;
        }
        autoplay.load();
        autoplay.play();
        true
    });

    let on_vinyl = {
        let deck = deck.clone();
        move |_: web_sys::MouseEvent| deck.toggle_panel()
    };
    let on_play = {
        let deck = deck.clone();
        move |_: web_sys::MouseEvent| deck.toggle_play()
    };
    let on_prev = {
        let deck = deck.clone();
        move |_: web_sys::MouseEvent| {
            deck.skip(false);
            deck.reset_hide();
        }
    };
    let on_next = {
        let deck = deck.clone();
        move |_: web_sys::MouseEvent| {
            deck.skip(true);
            deck.reset_hide();
        }
    };
    let on_volume = {
        let deck = deck.clone();
        move |ev: web_sys::Event| {
            if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                set_volume.set(v.clamp(0.0, 1.0));
            }
            deck.reset_hide();
        }
    };
    let on_ended = move |_: web_sys::Event| deck.skip(true);

    view! {
        <div id="music-player" class="music-player" class:closed=move || closed.get()>
            <audio node_ref=audio_ref preload="none" on:ended=on_ended></audio>
            <div class="vinyl-icon" class:spinning=move || playing.get() on:click=on_vinyl>
                <i class="fas fa-compact-disc"></i>
            </div>
            <div class="player-panel">
                <span id="current-track-name" class="track-name">
                    {move || playlist.with(|p| p.current().name)}
                </span>
                <div class="player-buttons">
                    <button class="prev-btn" aria-label="Previous" on:click=on_prev>
                        <i class="fas fa-backward"></i>
                    </button>
                    <button
                        class="play-pause-btn"
                        aria-label=move || if playing.get() { "Pause" } else { "Play" }
                        on:click=on_play
                    >
                        <i class=move || if playing.get() { "fas fa-pause" } else { "fas fa-play" }></i>
                    </button>
                    <button class="next-btn" aria-label="Next" on:click=on_next>
                        <i class="fas fa-forward"></i>
                    </button>
                </div>
                <input
                    class="volume-slider"
                    type="range"
                    min="0"
                    max="1"
                    step="0.01"
                    prop:value=move || volume.get().to_string()
                    on:input=on_volume
                />
            </div>
        </div>
    }
}
