//! Engine configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```
//! use skirmish_engine::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "target_fps": 30 }"#).unwrap();
//! assert_eq!(config.target_fps, 30);
//! assert_eq!(config.max_delta_secs, 0.05);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Window, pacing and gameplay tunables for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Viewport width in pixels; also the camera width.
    pub window_width: u32,
    /// Viewport height in pixels; also the camera height.
    pub window_height: u32,
    /// Frame rate the driver paces to.
    pub target_fps: u32,
    /// Ceiling on the delta-time handed to updates, in seconds.
    pub max_delta_secs: f32,
    /// Name of the entity the camera follows.
    pub player_entity: String,
    /// Draw collider outlines from the first frame (F1 toggles).
    pub show_colliders: bool,
    /// Movement speed for keyboard-controlled entities that do not set one.
    pub player_speed: f32,
    /// Speed of fired projectiles that do not set one.
    pub projectile_speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            max_delta_secs: 0.05,
            player_entity: "player".to_owned(),
            show_colliders: false,
            player_speed: 150.0,
            projectile_speed: 300.0,
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame driver cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(EngineError::Initialization(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.target_fps == 0 {
            return Err(EngineError::Initialization(
                "target_fps must be positive".to_owned(),
            ));
        }
        if !(self.max_delta_secs.is_finite() && self.max_delta_secs > 0.0) {
            return Err(EngineError::Initialization(format!(
                "max_delta_secs must be positive and finite, got {}",
                self.max_delta_secs
            )));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("projectile_speed", self.projectile_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::Initialization(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Wall-clock budget for one frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.player_entity, "player");
        let budget = config.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_fps_is_rejected() {
        let config = EngineConfig {
            target_fps: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::Initialization(_))
        ));
    }

    #[test]
    fn non_finite_delta_ceiling_is_rejected() {
        for bad in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let config = EngineConfig {
                max_delta_secs: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn negative_speed_is_rejected() {
        let config = EngineConfig {
            player_speed: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("player_speed"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "player_entity": "chopper", "show_colliders": true }"#)
                .unwrap();
        assert_eq!(config.player_entity, "chopper");
        assert!(config.show_colliders);
        assert_eq!(config.window_width, 800);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
