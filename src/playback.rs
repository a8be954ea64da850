//! Playback Arithmetic
//!
//! Time formatting, seek and volume mapping shared by both players, the
//! wrapping cursor behind the playlist and its auto-hide rules.

/// `M:SS`, minutes unpadded. Negative or non-finite input reads as zero.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// A media duration worth computing with
pub fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Elapsed share of the track in percent, 0 for an unknown duration
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    match usable_duration(duration) {
        Some(d) => (current / d * 100.0).clamp(0.0, 100.0),
        None => 0.0,
    }
}

/// Playback position for a click `offset_x` pixels into a track `width` pixels wide
pub fn seek_position(offset_x: f64, width: f64, duration: f64) -> Option<f64> {
    let duration = usable_duration(duration)?;
    if !(width > 0.0) {
        return None;
    }
    let ratio = offset_x.clamp(0.0, width) / width;
    Some(ratio * duration)
}

/// 0–100 slider value to 0.0–1.0 gain
pub fn slider_gain(value: f64) -> f64 {
    if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Ordered list with a wrapping cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist<T> {
    items: Vec<T>,
    current: usize,
}

impl<T> Playlist<T> {
    /// Returns None for an empty list
    pub fn new(items: Vec<T>) -> Option<Self> {
        (!items.is_empty()).then_some(Self { items, current: 0 })
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &T {
        &self.items[self.current]
    }

    pub fn next(&mut self) -> &T {
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> &T {
        let len = self.items.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }
}

/// Something that happened to the playlist player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    /// The browser accepted `play()`
    Started,
    /// The browser rejected `play()`
    Rejected,
    Paused,
    /// Any control touched: skip, volume, reopening the panel
    Interacted,
    PanelClosed,
}

/// What an event does to the pending auto-hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideAction {
    /// Cancel the pending hide and start a fresh one
    Reschedule,
    Cancel,
}

/// Play state of the playlist player. The panel only hides itself while
/// music is actually playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckState {
    pub playing: bool,
}

impl DeckState {
    pub fn on(&mut self, event: DeckEvent) -> HideAction {
        match event {
            DeckEvent::Started => {
                self.playing = true;
                HideAction::Reschedule
            }
            DeckEvent::Rejected | DeckEvent::Paused => {
                self.playing = false;
                HideAction::Cancel
            }
            DeckEvent::PanelClosed => HideAction::Cancel,
            DeckEvent::Interacted if self.playing => HideAction::Reschedule,
            DeckEvent::Interacted => HideAction::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(7.9), "0:07");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(754.2), "12:34");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(30.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(30.0, 0.0), 0.0);
    }

    #[test]
    fn test_seek_is_proportional_and_clamped() {
        assert_eq!(seek_position(50.0, 200.0, 240.0), Some(60.0));
        assert_eq!(seek_position(-10.0, 200.0, 240.0), Some(0.0));
        assert_eq!(seek_position(500.0, 200.0, 240.0), Some(240.0));
    }

    #[test]
    fn test_seek_without_duration_is_noop() {
        assert_eq!(seek_position(50.0, 200.0, f64::NAN), None);
        assert_eq!(seek_position(50.0, 200.0, 0.0), None);
        assert_eq!(seek_position(50.0, 0.0, 240.0), None);
    }

    #[test]
    fn test_slider_gain() {
        assert_eq!(slider_gain(0.0), 0.0);
        assert_eq!(slider_gain(45.0), 0.45);
        assert_eq!(slider_gain(100.0), 1.0);
        assert_eq!(slider_gain(140.0), 1.0);
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut playlist = Playlist::new(vec!["a", "b", "c"]).unwrap();
        playlist.next();
        playlist.next();
        assert_eq!(playlist.index(), 2);
        assert_eq!(*playlist.next(), "a");
        assert_eq!(playlist.index(), 0);
    }

    #[test]
    fn test_prev_wraps_from_first_to_last() {
        let mut playlist = Playlist::new(vec![1, 2, 3]).unwrap();
        assert_eq!(*playlist.prev(), 3);
        assert_eq!(*playlist.prev(), 2);
    }

    #[test]
    fn test_single_track_stays_put() {
        let mut playlist = Playlist::new(vec!["only"]).unwrap();
        playlist.next();
        playlist.prev();
        assert_eq!(playlist.index(), 0);
    }

    #[test]
    fn test_empty_playlist_is_rejected() {
        assert!(Playlist::<u8>::new(Vec::new()).is_none());
    }

    #[test]
    fn test_hide_is_scheduled_only_while_playing() {
        let mut deck = DeckState::default();
        assert_eq!(deck.on(DeckEvent::Interacted), HideAction::Cancel);
        assert_eq!(deck.on(DeckEvent::Started), HideAction::Reschedule);
        assert!(deck.playing);
        assert_eq!(deck.on(DeckEvent::Interacted), HideAction::Reschedule);
        assert_eq!(deck.on(DeckEvent::Interacted), HideAction::Reschedule);
    }

    #[test]
    fn test_pause_cancels_hide() {
        let mut deck = DeckState { playing: true };
        assert_eq!(deck.on(DeckEvent::Paused), HideAction::Cancel);
        assert!(!deck.playing);
        assert_eq!(deck.on(DeckEvent::Interacted), HideAction::Cancel);
    }

    #[test]
    fn test_rejected_play_leaves_deck_stopped() {
        // skipping while playing loads the next track and plays it; the browser refuses
        let mut deck = DeckState { playing: true };
        assert_eq!(deck.on(DeckEvent::Rejected), HideAction::Cancel);
        assert!(!deck.playing);
    }

    #[test]
    fn test_closing_panel_keeps_music_playing() {
        let mut deck = DeckState { playing: true };
        assert_eq!(deck.on(DeckEvent::PanelClosed), HideAction::Cancel);
        assert!(deck.playing);
    }
}
