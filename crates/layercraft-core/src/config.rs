//! Editor tuning parameters.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Width used for layers that carry neither a width nor a radius.
pub const DEFAULT_WIDTH: f64 = 100.0;
/// Height used for layers that carry neither a height nor a radius.
pub const DEFAULT_HEIGHT: f64 = 50.0;
/// Smallest width/height a resize can produce (canvas units).
pub const MIN_SIZE: f64 = 20.0;
/// Smallest radius a circle resize can produce (canvas units).
pub const MIN_RADIUS: f64 = 10.0;
/// Alignment snap distance in screen pixels.
pub const SNAP_THRESHOLD_PX: f64 = 5.0;
/// Distance from the top edge to the rotate handle in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 25.0;
/// Handle hit radius in screen pixels.
pub const HANDLE_HIT_TOLERANCE_PX: f64 = 8.0;
/// Rotation increment while Shift is held, in degrees.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable editor behaviour. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Alignment snap distance in screen pixels (divided by zoom at use).
    pub snap_threshold_px: f64,
    /// Whether drags snap to sibling layers at all.
    pub snapping_enabled: bool,
    /// Minimum width/height for rectangular resize.
    pub min_size: f64,
    /// Minimum circle radius for resize.
    pub min_radius: f64,
    /// Rotate handle distance above the layer in screen pixels.
    pub rotate_handle_offset_px: f64,
    /// Handle hit radius in screen pixels.
    pub handle_hit_tolerance_px: f64,
    /// Maximum number of committed snapshots kept (None = unbounded).
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: SNAP_THRESHOLD_PX,
            snapping_enabled: true,
            min_size: MIN_SIZE,
            min_radius: MIN_RADIUS,
            rotate_handle_offset_px: ROTATE_HANDLE_OFFSET_PX,
            handle_hit_tolerance_px: HANDLE_HIT_TOLERANCE_PX,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"snapThresholdPx": 8.0}"#).unwrap();
        assert!((config.snap_threshold_px - 8.0).abs() < f64::EPSILON);
        assert!((config.min_size - MIN_SIZE).abs() < f64::EPSILON);
        assert!(config.snapping_enabled);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_invalid_config() {
        let result = EditorConfig::from_json("{\"minSize\": \"big\"}");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
