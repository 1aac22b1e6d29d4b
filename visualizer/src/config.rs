//! Start-up configuration of the visualizer.

use std::time::Duration;

use astarviz_search::{is_valid_size, DEFAULT_SIZE, DEFAULT_WALL_PROBABILITY};

/// Default animation rate.
pub const DEFAULT_FPS: u32 = 60;
/// Highest accepted animation rate.
pub const MAX_FPS: u32 = 1000;

/// Initial grid size, wall density and animation rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualizerConfig {
    /// Side length of the square grid.
    pub size: i32,
    /// Chance that a cell becomes a wall when randomizing.
    pub wall_probability: f64,
    /// Search steps per second while animating.
    pub fps: u32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            fps: DEFAULT_FPS,
        }
    }
}

impl VisualizerConfig {
    /// Replace out-of-range fields with their defaults, logging a warning
    /// for each.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let mut cfg = self;
        if !is_valid_size(cfg.size) {
            log::warn!("grid size {} out of range, using {}", cfg.size, defaults.size);
            cfg.size = defaults.size;
        }
        if !(0.0..=1.0).contains(&cfg.wall_probability) {
            log::warn!(
                "wall probability {} out of range, using {}",
                cfg.wall_probability,
                defaults.wall_probability
            );
            cfg.wall_probability = defaults.wall_probability;
        }
        if !(1..=MAX_FPS).contains(&cfg.fps) {
            log::warn!("fps {} out of range, using {}", cfg.fps, defaults.fps);
            cfg.fps = defaults.fps;
        }
        cfg
    }

    /// Time between two animation frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_is_kept() {
        let cfg = VisualizerConfig {
            size: 25,
            wall_probability: 0.5,
            fps: 30,
        };
        assert_eq!(cfg.validated(), cfg);
    }

    #[test]
    fn invalid_fields_fall_back() {
        let cfg = VisualizerConfig {
            size: 55,
            wall_probability: f64::NAN,
            fps: 0,
        }
        .validated();
        assert_eq!(cfg, VisualizerConfig::default());

        let cfg = VisualizerConfig {
            size: 4,
            wall_probability: 1.5,
            fps: 10,
        }
        .validated();
        assert_eq!(cfg.size, DEFAULT_SIZE);
        assert_eq!(cfg.wall_probability, DEFAULT_WALL_PROBABILITY);
        assert_eq!(cfg.fps, 10);
    }

    #[test]
    fn frame_interval_follows_fps() {
        let cfg = VisualizerConfig {
            fps: 50,
            ..VisualizerConfig::default()
        };
        assert_eq!(cfg.frame_interval(), Duration::from_millis(20));
    }
}
