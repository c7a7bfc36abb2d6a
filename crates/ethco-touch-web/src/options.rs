//! Options accepted by `attach`.

use ethco_touch_core::{ConfigError, OverlayConfig};
use serde::{Deserialize, Serialize};

/// Ids of the page elements the overlay drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomIds {
    /// Element wrapping the editor; receives editing-surface touches.
    pub container: String,
    pub handle_start: String,
    pub handle_end: String,
    pub toolbar: String,
    pub copy_button: String,
    pub paste_button: String,
    pub more_button: String,
    /// Optional; notifications are logged when it is missing.
    pub toast: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            container: "editor-container".to_string(),
            handle_start: "handle-start".to_string(),
            handle_end: "handle-end".to_string(),
            toolbar: "mini-toolbar".to_string(),
            copy_button: "btn-copy".to_string(),
            paste_button: "btn-paste".to_string(),
            more_button: "btn-more".to_string(),
            toast: "flash-toast".to_string(),
        }
    }
}

/// Everything `attach` can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachOptions {
    pub config: OverlayConfig,
    pub ids: DomIds,
}

impl AttachOptions {
    /// Check the overlay config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids_match_page() {
        let ids = DomIds::default();
        assert_eq!(ids.handle_start, "handle-start");
        assert_eq!(ids.toolbar, "mini-toolbar");
        assert_eq!(ids.toast, "flash-toast");
    }

    #[test]
    fn test_partial_options() {
        let options: AttachOptions = serde_json::from_str(
            r#"{"config": {"long_press_delay_ms": 700}, "ids": {"toolbar": "actions"}}"#,
        )
        .unwrap();
        assert_eq!(options.config.long_press_delay_ms, 700);
        assert_eq!(options.ids.toolbar, "actions");
        assert_eq!(options.ids.container, "editor-container");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let options: AttachOptions =
            serde_json::from_str(r#"{"config": {"move_tolerance": -3}}"#).unwrap();
        assert!(options.validate().is_err());
    }
}
