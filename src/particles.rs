//! Particle Field
//!
//! Positions are normalized to the field, `(0, 0)` top-left and `(1, 1)`
//! bottom-right, so the field can be resized without respawning.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::{ParticleConfig, ParticleMode};

/// Opacity pulse angular speed, radians per second
const PULSE_SPEED: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Field widths per second
    pub vx: f64,
    pub vy: f64,
    /// Diameter in pixels
    pub size: f64,
    pub opacity: f64,
    /// Pulse phase offset in radians
    pub phase: f64,
}

impl Particle {
    /// Move by `velocity × dt`, wrapping around the field edges
    pub fn advance(&mut self, dt_secs: f64) {
        self.x = wrap_unit(self.x + self.vx * dt_secs);
        self.y = wrap_unit(self.y + self.vy * dt_secs);
    }

    /// Opacity at `t_secs`, oscillating between half and full base opacity
    pub fn pulse_opacity(&self, t_secs: f64) -> f64 {
        let wave = (t_secs * PULSE_SPEED + self.phase).sin();
        (self.opacity * (0.75 + 0.25 * wave)).clamp(0.0, 1.0)
    }
}

/// Fold any position into `[0, 1)`
fn wrap_unit(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let wrapped = v.rem_euclid(1.0);
    // tiny negatives round up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Uniform sample from a (possibly reversed) range
fn sample_between<R: Rng>(rng: &mut R, (a, b): (f64, f64)) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !(lo.is_finite() && hi.is_finite()) || lo == hi {
        return if lo.is_finite() { lo } else { 0.0 };
    }
    rng.random_range(lo..hi)
}

/// Pair of independent standard normal samples (Box–Muller)
fn standard_normal_pair<R: Rng>(rng: &mut R) -> (f64, f64) {
    // (0, 1] so the log stays finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    (r * (TAU * u2).cos(), r * (TAU * u2).sin())
}

pub fn spawn<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Vec<Particle> {
    (0..config.count)
        .map(|_| {
            let (x, y, vx, vy) = match config.mode {
                ParticleMode::Gaussian { sigma } => {
                    let (dx, dy) = standard_normal_pair(rng);
                    let x = (0.5 + dx * sigma).clamp(0.0, 1.0);
                    let y = (0.5 + dy * sigma).clamp(0.0, 1.0);
                    (x, y, 0.0, 0.0)
                }
                ParticleMode::Drift { speed } => {
                    let x = rng.random::<f64>();
                    let y = rng.random::<f64>();
                    let magnitude = sample_between(rng, (0.0, speed.abs()));
                    let heading = rng.random::<f64>() * TAU;
                    (x, y, magnitude * heading.cos(), magnitude * heading.sin())
                }
            };
            Particle {
                x,
                y,
                vx,
                vy,
                size: sample_between(rng, config.size),
                opacity: sample_between(rng, config.opacity).clamp(0.0, 1.0),
                phase: rng.random::<f64>() * TAU,
            }
        })
        .collect()
}

/// Advance every particle. Static particles are left in place.
pub fn advance_all(particles: &mut [Particle], dt_secs: f64) {
    if !(dt_secs > 0.0) {
        return;
    }
    for particle in particles.iter_mut().filter(|p| p.vx != 0.0 || p.vy != 0.0) {
        particle.advance(dt_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn config(mode: ParticleMode) -> ParticleConfig {
        ParticleConfig {
            count: 200,
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_gaussian_particles_cluster_and_stay_static() {
        let mut rng = SmallRng::seed_from_u64(7);
        let particles = spawn(&config(ParticleMode::Gaussian { sigma: 0.1 }), &mut rng);
        assert_eq!(particles.len(), 200);
        assert!(particles.iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
        assert!(particles.iter().all(|p| p.vx == 0.0 && p.vy == 0.0));

        let mean_x = particles.iter().map(|p| p.x).sum::<f64>() / particles.len() as f64;
        assert!((mean_x - 0.5).abs() < 0.05, "mean {}", mean_x);
    }

    #[test]
    fn test_drift_velocity_is_bounded_by_speed() {
        let mut rng = SmallRng::seed_from_u64(11);
        let particles = spawn(&config(ParticleMode::Drift { speed: 0.05 }), &mut rng);
        for p in &particles {
            assert!(p.vx.hypot(p.vy) <= 0.05 + 1e-12);
            assert!((1.0..=3.0).contains(&p.size));
            assert!((0.2..=0.8).contains(&p.opacity));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let cfg = config(ParticleMode::Drift { speed: 0.02 });
        let a = spawn(&cfg, &mut SmallRng::seed_from_u64(3));
        let b = spawn(&cfg, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_wraps_around_edges() {
        let mut p = Particle { x: 0.95, y: 0.02, vx: 0.1, vy: -0.1, size: 2.0, opacity: 0.5, phase: 0.0 };
        p.advance(1.0);
        assert!((p.x - 0.05).abs() < 1e-9);
        assert!((p.y - 0.92).abs() < 1e-9);

        for _ in 0..1000 {
            p.advance(0.37);
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_wrap_unit_never_returns_one() {
        assert_eq!(wrap_unit(-1e-20), 0.0);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert_eq!(wrap_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_advance_all_skips_static_particles() {
        let still = Particle { x: 0.5, y: 0.5, vx: 0.0, vy: 0.0, size: 1.0, opacity: 0.5, phase: 0.0 };
        let mut field = [still, Particle { vx: 0.25, ..still }];
        advance_all(&mut field, 1.0);
        assert_eq!(field[0], still);
        assert!((field[1].x - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_pulse_stays_within_base_opacity() {
        let p = Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0, size: 1.0, opacity: 0.8, phase: 1.0 };
        for t in 0..100 {
            let o = p.pulse_opacity(t as f64 * 0.1);
            assert!((0.4..=0.8 + 1e-12).contains(&o));
        }
    }

    #[test]
    fn test_degenerate_ranges_do_not_panic() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(sample_between(&mut rng, (2.0, 2.0)), 2.0);
        let v = sample_between(&mut rng, (3.0, 1.0));
        assert!((1.0..3.0).contains(&v));
        let cfg = ParticleConfig { count: 5, mode: ParticleMode::Drift { speed: 0.0 }, ..Default::default() };
        assert!(spawn(&cfg, &mut rng).iter().all(|p| p.vx == 0.0 && p.vy == 0.0));
    }
}
