//! Page Configuration
//!
//! Tunables for every widget. A page may override any subset through an
//! inline `<script type="application/json" id="showcase-config">` block;
//! everything it leaves out keeps its default.

use serde::Deserialize;

use crate::error::ShowcaseError;

/// Id of the inline JSON config element
pub const CONFIG_ELEMENT_ID: &str = "showcase-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    pub player: PlayerConfig,
    pub ambient: AmbientConfig,
    pub legacy: LegacyConfig,
    pub parallax: ParallaxConfig,
    pub particles: ParticleConfig,
    pub map: MapConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            player: PlayerConfig::default(),
            ambient: AmbientConfig::default(),
            legacy: LegacyConfig::default(),
            parallax: ParallaxConfig::default(),
            particles: ParticleConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json(text: &str) -> Result<Self, ShowcaseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the inline config block. A page without one gets the defaults.
    pub fn from_page() -> Result<Self, ShowcaseError> {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match text {
            Some(text) if !text.trim().is_empty() => Self::from_json(&text),
            _ => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Source used by the single-track player when its host has no `data-src`
    pub default_src: String,
    /// Initial gain, 0.0 to 1.0
    pub initial_volume: f64,
    /// Idle time before the playlist panel hides itself
    pub auto_hide_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_src: "assets/music/theme.mp3".to_string(),
            initial_volume: 0.8,
            auto_hide_ms: 5000,
        }
    }
}

/// How the section "most in view" is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DominanceMetric {
    /// Section whose vertical center is closest to the viewport center
    #[default]
    CenterDistance,
    /// Section with the largest visible height
    VisibleArea,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub metric: DominanceMetric,
    pub target_volume: f64,
    pub fade_ms: u32,
    pub fade_steps: u32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            metric: DominanceMetric::CenterDistance,
            target_volume: 0.5,
            fade_ms: 1000,
            fade_steps: 50,
        }
    }
}

impl AmbientConfig {
    /// Interval between fade steps, at least 1 ms
    pub fn step_ms(&self) -> u32 {
        (self.fade_ms / self.fade_steps.max(1)).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    /// Class suffixes of the three scenes, in scroll order
    pub scenes: [String; 3],
    /// Final vignette bar width in percent
    pub vignette_max: f64,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            scenes: ["mos".to_string(), "bvs".to_string(), "zsjl".to_string()],
            vignette_max: 13.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Pointer offset is divided by this before applying depth
    pub divisor: f64,
    /// Viewport widths at or below this disable parallax
    pub breakpoint: f64,
    /// No pointer input for this long starts the idle drift
    pub idle_ms: u32,
    /// Drift amplitude in pixels per unit of depth
    pub drift_amplitude: f64,
    /// Drift angular speed in radians per millisecond
    pub drift_speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            divisor: 50.0,
            breakpoint: 768.0,
            idle_ms: 3000,
            drift_amplitude: 6.0,
            drift_speed: 0.0006,
        }
    }
}

/// Placement of particles in the field
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleMode {
    /// Static cluster around the center, normal offsets with this deviation
    Gaussian { sigma: f64 },
    /// Uniform placement, each particle drifting at up to `speed` field-widths per second
    Drift { speed: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub mode: ParticleMode,
    /// Dot diameter range in pixels
    pub size: (f64, f64),
    /// Base opacity range
    pub opacity: (f64, f64),
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            mode: ParticleMode::Drift { speed: 0.02 },
            size: (1.0, 3.0),
            opacity: (0.2, 0.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub zoom: u8,
    pub max_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            zoom: 15,
            max_zoom: 19,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_constants() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.ambient.target_volume, 0.5);
        assert_eq!(config.ambient.step_ms(), 20);
        assert_eq!(config.player.auto_hide_ms, 5000);
        assert_eq!(config.legacy.vignette_max, 13.75);
        assert_eq!(config.parallax.breakpoint, 768.0);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = ShowcaseConfig::from_json(
            r#"{ "log_level": "debug", "ambient": { "metric": "visible_area" } }"#,
        )
        .unwrap();
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        assert_eq!(config.ambient.metric, DominanceMetric::VisibleArea);
        assert_eq!(config.ambient.fade_steps, 50);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_particle_mode_is_tagged() {
        let config = ShowcaseConfig::from_json(
            r#"{ "particles": { "count": 12, "mode": { "kind": "gaussian", "sigma": 0.15 } } }"#,
        )
        .unwrap();
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.mode, ParticleMode::Gaussian { sigma: 0.15 });
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = ShowcaseConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(ShowcaseConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_zero_steps_does_not_divide_by_zero() {
        let ambient = AmbientConfig { fade_steps: 0, ..Default::default() };
        assert_eq!(ambient.step_ms(), 1000);
    }
}
