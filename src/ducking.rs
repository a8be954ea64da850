//! Ambient Ducking
//!
//! Picks the section most in view and decides which ambient track fades in
//! and which fades out. Nothing is audible until the page has seen a user
//! gesture; dominance is still tracked before that.

use crate::config::DominanceMetric;

/// Section geometry relative to the viewport top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn visible_height(&self, viewport_height: f64) -> f64 {
        let top = self.top.max(0.0);
        let bottom = (self.top + self.height).min(viewport_height);
        (bottom - top).max(0.0)
    }

    pub fn center_distance(&self, viewport_height: f64) -> f64 {
        (self.top + self.height / 2.0 - viewport_height / 2.0).abs()
    }
}

/// Index of the dominant section. Ties go to the earlier section.
pub fn dominant_index(sections: &[SectionBox], viewport_height: f64, metric: DominanceMetric) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, section) in sections.iter().enumerate() {
        let (score, better) = match metric {
            DominanceMetric::CenterDistance => {
                let d = section.center_distance(viewport_height);
                (d, best.map_or(true, |(_, b)| d < b))
            }
            DominanceMetric::VisibleArea => {
                let v = section.visible_height(viewport_height);
                (v, v > 0.0 && best.map_or(true, |(_, b)| v > b))
            }
        };
        if better && !score.is_nan() {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixCommand {
    FadeOut(String),
    FadeIn(String),
}

/// Which ambient track is audible
#[derive(Debug, Default)]
pub struct AmbientMixer {
    dominant: Option<String>,
    active: Option<String>,
    unlocked: bool,
}

impl AmbientMixer {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record the latest dominant section. Before unlock this never yields commands.
    pub fn observe(&mut self, dominant: Option<&str>) -> Vec<MixCommand> {
        if let Some(key) = dominant {
            self.dominant = Some(key.to_string());
        }
        if !self.unlocked {
            return Vec::new();
        }
        self.switch_to_dominant()
    }

    /// Open the gate once. Returns the commands for the current dominant
    /// section, or None if already unlocked.
    pub fn unlock(&mut self) -> Option<Vec<MixCommand>> {
        if self.unlocked {
            return None;
        }
        self.unlocked = true;
        Some(self.switch_to_dominant())
    }

    fn switch_to_dominant(&mut self) -> Vec<MixCommand> {
        let Some(next) = self.dominant.clone() else {
            return Vec::new();
        };
        if self.active.as_deref() == Some(next.as_str()) {
            return Vec::new();
        }
        let mut commands = Vec::with_capacity(2);
        if let Some(previous) = self.active.replace(next.clone()) {
            commands.push(MixCommand::FadeOut(previous));
        }
        commands.push(MixCommand::FadeIn(next));
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(spans: &[(f64, f64)]) -> Vec<SectionBox> {
        spans.iter().map(|&(top, height)| SectionBox { top, height }).collect()
    }

    #[test]
    fn test_center_distance_picks_nearest_center() {
        // viewport 800 -> center 400
        let sections = boxes(&[(-700.0, 800.0), (100.0, 800.0), (900.0, 800.0)]);
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::CenterDistance), Some(1));
    }

    #[test]
    fn test_visible_area_picks_largest_visible_part() {
        // a: 0..300 visible 300, b: 300..1300 visible 500
        let sections = boxes(&[(0.0, 300.0), (300.0, 1000.0)]);
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::VisibleArea), Some(1));
        // centers: a 150 (250 away), b 800 (400 away)
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::CenterDistance), Some(0));
    }

    #[test]
    fn test_nothing_visible_has_no_dominant_by_area() {
        let sections = boxes(&[(900.0, 100.0), (-500.0, 100.0)]);
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::VisibleArea), None);
        assert_eq!(dominant_index(&[], 800.0, DominanceMetric::CenterDistance), None);
    }

    #[test]
    fn test_ties_go_to_first_section() {
        let sections = boxes(&[(0.0, 400.0), (400.0, 400.0)]);
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::CenterDistance), Some(0));
        assert_eq!(dominant_index(&sections, 800.0, DominanceMetric::VisibleArea), Some(0));
    }

    #[test]
    fn test_locked_mixer_is_silent_but_tracks_dominance() {
        let mut mixer = AmbientMixer::default();
        assert!(mixer.observe(Some("song1")).is_empty());
        assert!(mixer.observe(Some("song2")).is_empty());
        assert_eq!(mixer.active(), None);

        let commands = mixer.unlock().unwrap();
        assert_eq!(commands, vec![MixCommand::FadeIn("song2".to_string())]);
        assert_eq!(mixer.active(), Some("song2"));
    }

    #[test]
    fn test_switch_fades_out_previous_track() {
        let mut mixer = AmbientMixer::default();
        mixer.observe(Some("song1"));
        mixer.unlock();
        assert!(mixer.observe(Some("song1")).is_empty());
        assert_eq!(
            mixer.observe(Some("song3")),
            vec![
                MixCommand::FadeOut("song1".to_string()),
                MixCommand::FadeIn("song3".to_string()),
            ]
        );
    }

    #[test]
    fn test_unlock_happens_once() {
        let mut mixer = AmbientMixer::default();
        assert_eq!(mixer.unlock(), Some(Vec::new()));
        assert!(mixer.unlock().is_none());
        assert!(mixer.is_unlocked());
    }

    #[test]
    fn test_no_dominant_keeps_current_track() {
        let mut mixer = AmbientMixer::default();
        mixer.observe(Some("song1"));
        mixer.unlock();
        assert!(mixer.observe(None).is_empty());
        assert_eq!(mixer.active(), Some("song1"));
    }
}
