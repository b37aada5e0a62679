//! Application settings configuration.

use serde::{Deserialize, Serialize};

use crate::bootstrap::DEFAULT_SELECTOR;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selector used to find the inputs to turn into tag editors.
    pub selector: String,
    /// Title shown above the form.
    pub title: String,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Whether to capture mouse events (hover and remove clicks).
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            title: "Tagfield".to_string(),
            tick_rate_ms: 100,
            mouse: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.selector, ".tagfield");
        assert_eq!(settings.tick_rate_ms, 100);
        assert!(settings.mouse);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = toml::from_str("mouse = false").unwrap();
        assert!(!settings.mouse);
        assert_eq!(settings.title, "Tagfield");
    }
}
