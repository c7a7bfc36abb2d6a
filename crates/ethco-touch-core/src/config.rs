//! Overlay configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default hold time before a press becomes a long-press.
pub const DEFAULT_LONG_PRESS_DELAY_MS: u64 = 500;
/// Default movement (per axis, in pixels) that turns a press into a pan.
pub const DEFAULT_MOVE_TOLERANCE: f64 = 10.0;
/// Default minimum distance between the toolbar anchor and a viewport edge.
pub const DEFAULT_TOOLBAR_EDGE_MARGIN: f64 = 90.0;
/// Default distance the toolbar sits above the selection start.
pub const DEFAULT_TOOLBAR_LIFT: f64 = 50.0;
/// Default gap between the finger and the handle glyph while dragging.
pub const DEFAULT_HANDLE_DRAG_LIFT: f64 = 35.0;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for gesture classification and overlay layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub long_press_delay_ms: u64,
    pub move_tolerance: f64,
    pub toolbar_edge_margin: f64,
    pub toolbar_lift: f64,
    pub handle_drag_lift: f64,
    pub haptic_ms: u64,
    pub toast_duration_ms: u64,
    pub copied_message: String,
    pub copy_failed_message: String,
    pub clipboard_denied_message: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            long_press_delay_ms: DEFAULT_LONG_PRESS_DELAY_MS,
            move_tolerance: DEFAULT_MOVE_TOLERANCE,
            toolbar_edge_margin: DEFAULT_TOOLBAR_EDGE_MARGIN,
            toolbar_lift: DEFAULT_TOOLBAR_LIFT,
            handle_drag_lift: DEFAULT_HANDLE_DRAG_LIFT,
            haptic_ms: 50,
            toast_duration_ms: 2000,
            copied_message: "Copied".to_string(),
            copy_failed_message: "Copy failed".to_string(),
            clipboard_denied_message: "Clipboard permission required".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the gesture machines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_press_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "long_press_delay_ms must be greater than zero".to_string(),
            ));
        }
        let distances = [
            ("move_tolerance", self.move_tolerance),
            ("toolbar_edge_margin", self.toolbar_edge_margin),
            ("toolbar_lift", self.toolbar_lift),
            ("handle_drag_lift", self.handle_drag_lift),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }

    pub fn haptic_duration(&self) -> Duration {
        Duration::from_millis(self.haptic_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behaviour() {
        let config = OverlayConfig::default();
        assert_eq!(config.long_press_delay(), Duration::from_millis(500));
        assert!((config.move_tolerance - 10.0).abs() < f64::EPSILON);
        assert!((config.toolbar_edge_margin - 90.0).abs() < f64::EPSILON);
        assert!((config.toolbar_lift - 50.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = OverlayConfig::from_json(r#"{"long_press_delay_ms": 650}"#).unwrap();
        assert_eq!(config.long_press_delay_ms, 650);
        assert_eq!(config.copied_message, "Copied");
    }

    #[test]
    fn test_rejects_zero_delay() {
        let err = OverlayConfig::from_json(r#"{"long_press_delay_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_distance() {
        let err = OverlayConfig::from_json(r#"{"move_tolerance": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = OverlayConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
