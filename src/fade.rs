//! Volume Fades
//!
//! A fade walks a track's volume to a target in a fixed number of equal
//! steps: Idle -> Fading -> Settled. Settling at zero pauses the track and
//! rewinds it.

use crate::timer::{Repeating, Ticker};

/// The parts of a media element a fade touches
pub trait MediaTrack {
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn is_paused(&self) -> bool;
    /// Begin playback. Failures are reported by the implementation.
    fn start(&self);
    fn stop_and_rewind(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Idle,
    Fading,
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeFade {
    target: f64,
    increment: f64,
    steps: u32,
    taken: u32,
}

impl VolumeFade {
    /// Plan a fade from the track's current volume. A positive target
    /// starts a paused track right away.
    pub fn begin<M: MediaTrack>(track: &M, target: f64, steps: u32) -> Self {
        let target = target.clamp(0.0, 1.0);
        let steps = steps.max(1);
        if target > 0.0 && track.is_paused() {
            track.start();
        }
        Self {
            target,
            increment: (target - track.volume()) / steps as f64,
            steps,
            taken: 0,
        }
    }

    pub fn phase(&self) -> FadePhase {
        match self.taken {
            0 => FadePhase::Idle,
            n if n < self.steps => FadePhase::Fading,
            _ => FadePhase::Settled,
        }
    }

    /// Apply one step
    pub fn step<M: MediaTrack>(&mut self, track: &M) -> FadePhase {
        if self.taken >= self.steps {
            return FadePhase::Settled;
        }
        self.taken += 1;
        if self.taken < self.steps {
            track.set_volume((track.volume() + self.increment).clamp(0.0, 1.0));
            return FadePhase::Fading;
        }
        track.set_volume(self.target);
        if self.target == 0.0 {
            track.stop_and_rewind();
        }
        FadePhase::Settled
    }
}

/// Runs fades for one track; starting a fade cancels the one in flight
#[derive(Clone, Default)]
pub struct Fader<T: Ticker = Repeating> {
    ticker: T,
}

impl<T: Ticker> Fader<T> {
    pub fn fade_to<M>(&self, track: &M, target: f64, steps: u32, step_ms: u32)
    where
        M: MediaTrack + Clone + 'static,
    {
        self.ticker.stop();
        let mut fade = VolumeFade::begin(track, target, steps);
        let track = track.clone();
        self.ticker.start(step_ms, move || fade.step(&track) == FadePhase::Fading);
    }

    /// No fade running and the track at zero volume
    pub fn is_silent<M: MediaTrack>(&self, track: &M) -> bool {
        !self.ticker.is_running() && track.volume() == 0.0
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::Cell;

    use super::MediaTrack;

    /// Media double recording what a fade did to it
    pub struct FakeTrack {
        pub volume: Cell<f64>,
        pub paused: Cell<bool>,
        pub position: Cell<f64>,
        pub starts: Cell<u32>,
    }

    impl FakeTrack {
        pub fn playing_at(volume: f64, position: f64) -> Self {
            Self {
                volume: Cell::new(volume),
                paused: Cell::new(false),
                position: Cell::new(position),
                starts: Cell::new(0),
            }
        }

        pub fn paused_at(volume: f64) -> Self {
            let track = Self::playing_at(volume, 0.0);
            track.paused.set(true);
            track
        }
    }

    impl<M: MediaTrack> MediaTrack for std::rc::Rc<M> {
        fn volume(&self) -> f64 {
            (**self).volume()
        }

        fn set_volume(&self, volume: f64) {
            (**self).set_volume(volume)
        }

        fn is_paused(&self) -> bool {
            (**self).is_paused()
        }

        fn start(&self) {
            (**self).start()
        }

        fn stop_and_rewind(&self) {
            (**self).stop_and_rewind()
        }
    }

    impl MediaTrack for FakeTrack {
        fn volume(&self) -> f64 {
            self.volume.get()
        }

        fn set_volume(&self, volume: f64) {
            self.volume.set(volume);
        }

        fn is_paused(&self) -> bool {
            self.paused.get()
        }

        fn start(&self) {
            self.starts.set(self.starts.get() + 1);
            self.paused.set(false);
        }

        fn stop_and_rewind(&self) {
            self.paused.set(true);
            self.position.set(0.0);
        }
    }
}
