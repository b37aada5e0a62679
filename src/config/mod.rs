//! Configuration management for Tagfield.
//!
//! Settings live in a TOML file in the platform configuration directory
//! (`~/.config/tagfield/config.toml` on Linux). A missing file is not an
//! error: defaults are used instead.

mod field;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dom::Selector;
use crate::editor::EditorConfig;

pub use field::FieldSpec;
pub use settings::Settings;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create config directory: {0}")]
    CreateDirError(std::io::Error),

    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file could not be written.
    #[error("failed to write config file: {0}")]
    WriteError(std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The configuration parsed but holds invalid values.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options applied to every tag editor.
    pub editor: EditorConfig,
    /// Application settings.
    pub settings: Settings,
    /// Fields of the form shown by the terminal front end.
    #[serde(rename = "field")]
    pub fields: Vec<FieldSpec>,
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("tagfield").join("config.toml"))
    }

    /// Load the configuration from the default location.
    ///
    /// Returns the default configuration if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), fields = config.fields.len(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Check settings and every field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for an unusable selector,
    /// an invalid field, or two fields sharing a name.
    pub fn validate(&self) -> Result<()> {
        Selector::parse(&self.settings.selector).map_err(|e| {
            ConfigError::ValidationError(format!(
                "selector '{}': {}",
                self.settings.selector, e
            ))
        })?;

        for field in &self.fields {
            field.validate()?;
        }

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }

        Ok(())
    }

    /// Fields to show, falling back to a single `tags` field.
    pub fn effective_fields(&self) -> Vec<FieldSpec> {
        if self.fields.is_empty() {
            vec![FieldSpec::new("tags")]
        } else {
            self.fields.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Dimension;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.fields.is_empty());
        assert_eq!(config.editor, EditorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_fields_default() {
        let config = Config::default();
        let fields = config.effective_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "tags");
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
[editor]
trim_input = true
maxHeight = 120

[settings]
selector = ".labels"

[[field]]
name = "labels"
label = "Labels"
placeholder = "Add a label"

[[field]]
name = "components[]"
"#,
        )
        .unwrap();

        assert!(config.editor.trim_input);
        assert_eq!(config.editor.max_height, Some(Dimension::Px(120.0)));
        assert_eq!(config.settings.selector, ".labels");
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[0].placeholder.as_deref(), Some("Add a label"));
        assert_eq!(config.fields[1].name, "components[]");
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml("editor = 5");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let result = Config::from_toml("[settings]\nselector = \"form input\"\n");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("form input"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = Config::from_toml("[[field]]\nname = \"tags\"\n[[field]]\nname = \"tags\"\n");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duplicate field name 'tags'"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.editor.debug = true;
        config.editor.width = Some(Dimension::from("50%"));
        config.fields.push(FieldSpec::new("labels"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_config_path() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("tagfield/config.toml"));
        }
    }
}
