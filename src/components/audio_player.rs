//! Audio Player Component
//!
//! Single-track player: play/pause, seekable progress bar, volume slider,
//! and prev/next buttons that restart the track.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlAudioElement;

use crate::media;
use crate::playback::{format_time, progress_percent, seek_position, slider_gain, usable_duration};

#[component]
fn PlayIcon(playing: ReadSignal<bool>) -> impl IntoView {
    view! {
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor" width="36px" height="36px">
            {move || if playing.get() {
                view! { <path d="M6 19h4V5H6v14zm8-14v14h4V5h-4z"/> }.into_any()
            } else {
                view! { <path d="M8 5v14l11-7z"/> }.into_any()
            }}
        </svg>
    }
}

/// Single-track audio player
///
/// # Arguments
/// * `src` - audio source URL
/// * `initial_volume` - starting gain, 0.0 to 1.0
#[component]
pub fn AudioPlayer(#[prop(into)] src: String, initial_volume: f64) -> impl IntoView {
    let audio_ref = NodeRef::<leptos::html::Audio>::new();
    let track_ref = NodeRef::<leptos::html::Div>::new();

    let (playing, set_playing) = signal(false);
    let (position, set_position) = signal(0.0f64);
    let (duration, set_duration) = signal(f64::NAN);
    let (failed, set_failed) = signal(false);
    let (volume, set_volume) = signal((initial_volume.clamp(0.0, 1.0) * 100.0).round());

    // Optimistic: shown as playing until the browser rejects
    let start = move |audio: HtmlAudioElement| {
        set_playing.set(true);
        spawn_local(async move {
            if let Err(e) = media::play(&audio).await {
                log::error!("audio play failed: {}", e);
                set_playing.set(false);
            }
        });
    };

    let toggle = move |_: web_sys::MouseEvent| {
        let Some(audio) = audio_ref.get_untracked() else { return };
        if audio.paused() {
            start(audio);
        } else {
            let _ = audio.pause();
            set_playing.set(false);
        }
    };

    let restart = move |_: web_sys::MouseEvent| {
        let Some(audio) = audio_ref.get_untracked() else { return };
        audio.set_current_time(0.0);
        set_position.set(0.0);
        start(audio);
    };

    let on_seek = move |ev: web_sys::MouseEvent| {
        let (Some(audio), Some(track)) = (audio_ref.get_untracked(), track_ref.get_untracked()) else {
            return;
        };
        let Some(at) = seek_position(ev.offset_x() as f64, track.client_width() as f64, audio.duration()) else {
            return;
        };
        audio.set_current_time(at);
        set_position.set(at);
        if audio.paused() {
            start(audio);
        }
    };

    Effect::new(move |_| {
        let gain = slider_gain(volume.get());
        if let Some(audio) = audio_ref.get() {
            audio.set_volume(gain);
        }
    });

    let sync_duration = move |_: web_sys::Event| {
        if let Some(audio) = audio_ref.get_untracked() {
            set_duration.set(audio.duration());
        }
    };

    view! {
        <div class="audio-player">
            <audio
                id="audio-player"
                node_ref=audio_ref
                src=src
                preload="metadata"
                on:timeupdate=move |_| {
                    if let Some(audio) = audio_ref.get_untracked() {
                        set_position.set(audio.current_time());
                    }
                }
                on:loadedmetadata=sync_duration
                on:durationchange=sync_duration
                on:ended=move |_| {
                    if let Some(audio) = audio_ref.get_untracked() {
                        audio.set_current_time(0.0);
                    }
                    set_position.set(0.0);
                    set_playing.set(false);
                }
                on:error=move |_| {
                    log::error!("audio player error");
                    set_failed.set(true);
                }
            ></audio>

            <div class="player-controls">
                <button id="prev-btn" class="control-btn" aria-label="Previous" on:click=restart>"⏮"</button>
                <button
                    id="play-pause-btn"
                    class="control-btn play-pause"
                    aria-label=move || if playing.get() { "Pause" } else { "Play" }
                    on:click=toggle
                >
                    <span id="play-pause-icon"><PlayIcon playing=playing/></span>
                </button>
                <button id="next-btn" class="control-btn" aria-label="Next" on:click=restart>"⏭"</button>
            </div>

            <div class="progress-row">
                <span id="current-time">
                    {move || match usable_duration(duration.get()) {
                        Some(_) => format_time(position.get()),
                        None => format_time(0.0),
                    }}
                </span>
                <div id="progress-container" class="progress-container" node_ref=track_ref on:click=on_seek>
                    <div
                        id="progress"
                        class="progress"
                        style:width=move || format!("{}%", progress_percent(position.get(), duration.get()))
                    ></div>
                </div>
                <span id="total-time">
                    {move || {
                        if failed.get() {
                            "Error".to_string()
                        } else {
                            format_time(usable_duration(duration.get()).unwrap_or(0.0))
                        }
                    }}
                </span>
            </div>

            <input
                id="volume-slider"
                type="range"
                min="0"
                max="100"
                prop:value=move || volume.get().to_string()
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                        set_volume.set(v);
                    }
                }
            />
        </div>
    }
}
