//! Parallax Geometry
//!
//! Pointer parallax, idle drift and scroll-speed offsets for decorative
//! layers. Every layer carries a depth (or speed) factor; larger factors
//! move further.

/// Parallax only runs on viewports wider than the breakpoint
pub fn parallax_enabled(viewport_width: f64, breakpoint: f64) -> bool {
    viewport_width > breakpoint
}

/// What the idle drift loop does on its next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftStep {
    Render,
    /// Pointer input took over
    Stop,
    /// Viewport too narrow: end the loop and wait for the next idle period
    Suspend,
}

pub fn drift_step(drifting: bool, viewport_width: f64, breakpoint: f64) -> DriftStep {
    if !drifting {
        DriftStep::Stop
    } else if !parallax_enabled(viewport_width, breakpoint) {
        DriftStep::Suspend
    } else {
        DriftStep::Render
    }
}

/// Numeric `data-depth` / `data-scroll-speed` value. Missing or unreadable
/// attributes leave the layer still.
pub fn parse_factor(attr: Option<&str>) -> f64 {
    attr.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Pointer displacement from the hero center, scaled down by `divisor`
pub fn pointer_offset(pointer: (f64, f64), center: (f64, f64), divisor: f64) -> (f64, f64) {
    if divisor == 0.0 {
        return (0.0, 0.0);
    }
    ((pointer.0 - center.0) / divisor, (pointer.1 - center.1) / divisor)
}

/// Layers move against the pointer
pub fn depth_translation(offset: (f64, f64), depth: f64) -> (f64, f64) {
    (-offset.0 * depth, -offset.1 * depth)
}

/// Autonomous drift at `t_ms`. The depth also shifts the phase so layers
/// don't move in lockstep.
pub fn drift_translation(t_ms: f64, depth: f64, amplitude: f64, speed: f64) -> (f64, f64) {
    let phase = speed * t_ms;
    (
        amplitude * depth * (phase + depth).sin(),
        amplitude * depth * (phase * 0.8 + depth).cos(),
    )
}

/// Vertical offset of a scroll visual relative to its section
pub fn scroll_translation(scroll_y: f64, section_top: f64, speed: f64) -> f64 {
    (scroll_y - section_top) * speed
}

pub fn translate3d((x, y): (f64, f64)) -> String {
    format!("translate3d({}px, {}px, 0)", x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_step() {
        assert_eq!(drift_step(true, 1280.0, 768.0), DriftStep::Render);
        assert_eq!(drift_step(false, 1280.0, 768.0), DriftStep::Stop);
        assert_eq!(drift_step(true, 768.0, 768.0), DriftStep::Suspend);
        assert_eq!(drift_step(false, 400.0, 768.0), DriftStep::Stop);
    }

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert!(!parallax_enabled(768.0, 768.0));
        assert!(!parallax_enabled(500.0, 768.0));
        assert!(parallax_enabled(769.0, 768.0));
    }

    #[test]
    fn test_layers_move_against_pointer() {
        let offset = pointer_offset((600.0, 300.0), (500.0, 400.0), 50.0);
        assert_eq!(offset, (2.0, -2.0));
        assert_eq!(depth_translation(offset, 0.5), (-1.0, 1.0));
        assert_eq!(depth_translation(offset, 0.0), (-0.0, 0.0));
    }

    #[test]
    fn test_pointer_at_center_is_still() {
        let offset = pointer_offset((500.0, 400.0), (500.0, 400.0), 50.0);
        assert_eq!(depth_translation(offset, 3.0), (-0.0, -0.0));
    }

    #[test]
    fn test_drift_is_bounded_by_amplitude() {
        let depth = 1.5;
        for t in (0..60_000).step_by(250) {
            let (x, y) = drift_translation(t as f64, depth, 6.0, 0.0006);
            assert!(x.abs() <= 6.0 * depth + 1e-9);
            assert!(y.abs() <= 6.0 * depth + 1e-9);
        }
    }

    #[test]
    fn test_drift_at_time_zero() {
        let (x, y) = drift_translation(0.0, 1.0, 6.0, 0.0006);
        assert!((x - 6.0 * 1f64.sin()).abs() < 1e-12);
        assert!((y - 6.0 * 1f64.cos()).abs() < 1e-12);
        assert_eq!(drift_translation(1234.0, 0.0, 6.0, 0.0006), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_translation() {
        assert_eq!(scroll_translation(1500.0, 1000.0, 0.2), 100.0);
        assert_eq!(scroll_translation(500.0, 1000.0, 0.2), -100.0);
    }

    #[test]
    fn test_parse_factor() {
        assert_eq!(parse_factor(Some("0.3")), 0.3);
        assert_eq!(parse_factor(Some(" -1.5 ")), -1.5);
        assert_eq!(parse_factor(Some("deep")), 0.0);
        assert_eq!(parse_factor(None), 0.0);
    }

    #[test]
    fn test_translate3d_format() {
        assert_eq!(translate3d((1.5, -2.0)), "translate3d(1.5px, -2px, 0)");
    }
}
