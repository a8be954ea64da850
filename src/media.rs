//! Media Element Bindings
//!
//! `play()` returns a promise the browser may reject (autoplay policy).
//! Rejections are caught here and reported, never propagated further.

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlMediaElement;

use crate::error::ShowcaseError;
use crate::fade::MediaTrack;

/// Start playback and wait for the browser to accept it
pub async fn play(media: &HtmlMediaElement) -> Result<(), ShowcaseError> {
    let promise = media.play()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Start playback in the background, logging a rejection
pub fn play_logged(media: &HtmlMediaElement, context: &'static str) {
    let media = media.clone();
    leptos::task::spawn_local(async move {
        if let Err(e) = play(&media).await {
            log::error!("{}: playback rejected: {}", context, e);
        }
    });
}

/// Play then pause, so later script-initiated playback is allowed. The
/// pause is skipped when `still_silent` says the track has been put to use
/// while `play()` was pending.
pub fn prime(media: &HtmlMediaElement, still_silent: impl FnOnce() -> bool + 'static) {
    let media = media.clone();
    leptos::task::spawn_local(async move {
        if play(&media).await.is_ok() && still_silent() {
            let _ = media.pause();
        }
    });
}

impl MediaTrack for HtmlMediaElement {
    fn volume(&self) -> f64 {
        HtmlMediaElement::volume(self)
    }

    fn set_volume(&self, volume: f64) {
        HtmlMediaElement::set_volume(self, volume);
    }

    fn is_paused(&self) -> bool {
        self.paused()
    }

    fn start(&self) {
        play_logged(self, "ambient track");
    }

    fn stop_and_rewind(&self) {
        let _ = self.pause();
        self.set_current_time(0.0);
    }
}
