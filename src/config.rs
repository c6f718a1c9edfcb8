//! Designer configuration supplied by the host page.
//!
//! The host passes a JSON object (typically from a `data-` attribute on the
//! mount element). Every key is optional; absent keys fall back to the
//! constants in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DRAG_THRESHOLD, GRID_SIZE, MAGNET_THRESHOLD, NUDGE_MULTIPLIER, ROOM_HEIGHT, ROOM_WIDTH};
use crate::layout::Size;

/// Error returned by [`DesignerConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config text is not a valid JSON object of the expected shape.
    #[error("invalid designer config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Room dimensions must be positive.
    #[error("room size must be positive, got {width}x{height}")]
    InvalidRoom { width: i32, height: i32 },
    /// Grid pitch must be positive.
    #[error("grid size must be positive, got {0}")]
    InvalidGrid(i32),
    /// An interaction threshold or multiplier is out of range.
    #[error("{name} out of range, got {value}")]
    InvalidSetting { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub room_width: i32,
    pub room_height: i32,
    pub grid_size: i32,
    pub magnet_threshold: i32,
    pub drag_threshold: f64,
    pub nudge_multiplier: i32,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            room_width: ROOM_WIDTH,
            room_height: ROOM_HEIGHT,
            grid_size: GRID_SIZE,
            magnet_threshold: MAGNET_THRESHOLD,
            drag_threshold: DRAG_THRESHOLD,
            nudge_multiplier: NUDGE_MULTIPLIER,
        }
    }
}

impl DesignerConfig {
    /// Parse a host-supplied JSON object, filling absent keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid JSON, the room or
    /// grid dimensions are not positive, a threshold is negative, or the
    /// nudge multiplier is below 1.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        if cfg.room_width <= 0 || cfg.room_height <= 0 {
            return Err(ConfigError::InvalidRoom { width: cfg.room_width, height: cfg.room_height });
        }
        if cfg.grid_size <= 0 {
            return Err(ConfigError::InvalidGrid(cfg.grid_size));
        }
        if cfg.magnet_threshold < 0 {
            return Err(ConfigError::InvalidSetting {
                name: "magnet_threshold",
                value: f64::from(cfg.magnet_threshold),
            });
        }
        if !(cfg.drag_threshold >= 0.0 && cfg.drag_threshold.is_finite()) {
            return Err(ConfigError::InvalidSetting { name: "drag_threshold", value: cfg.drag_threshold });
        }
        if cfg.nudge_multiplier < 1 {
            return Err(ConfigError::InvalidSetting {
                name: "nudge_multiplier",
                value: f64::from(cfg.nudge_multiplier),
            });
        }
        Ok(cfg)
    }

    /// Room dimensions in world units.
    #[must_use]
    pub fn room(&self) -> Size {
        Size::new(self.room_width, self.room_height)
    }
}
