//! Scroll Cross-fade
//!
//! Maps scroll progress through a pinned section onto the opacity of three
//! stacked scenes and the width of a vignette.

/// Progress where the first fade hands over to the second
const PHASE_SPLIT: f64 = 0.5;

/// Section rectangle relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Entirely above or below the viewport
    pub fn is_offscreen(&self, viewport_height: f64) -> bool {
        self.top > viewport_height || self.bottom() < 0.0
    }

    /// How far the section has been scrolled through, 0.0 to 1.0
    pub fn progress(&self, viewport_height: f64) -> f64 {
        let scrollable = self.height - viewport_height;
        if !(scrollable > 0.0) {
            return if self.top >= 0.0 { 0.0 } else { 1.0 };
        }
        (-self.top / scrollable).clamp(0.0, 1.0)
    }
}

/// Visual state of the three scenes at one scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossfadeFrame {
    pub opacities: [f64; 3],
    /// Vignette width and last-scene horizontal padding, in percent
    pub vignette_pct: f64,
}

impl CrossfadeFrame {
    pub fn at(progress: f64, vignette_max: f64) -> Self {
        let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        if progress <= PHASE_SPLIT {
            let p = progress / PHASE_SPLIT;
            Self {
                opacities: [1.0 - p, p, 0.0],
                vignette_pct: 0.0,
            }
        } else {
            let p = (progress - PHASE_SPLIT) / (1.0 - PHASE_SPLIT);
            Self {
                opacities: [0.0, 1.0 - p, p],
                vignette_pct: p * vignette_max,
            }
        }
    }

    /// Stacking order for scene `i`: the mostly visible scene sits on top
    pub fn z_index(&self, i: usize) -> u8 {
        match self.opacities.get(i) {
            Some(&o) if o > 0.5 => 2,
            _ => 1,
        }
    }
}
