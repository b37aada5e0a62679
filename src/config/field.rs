//! Form field definitions.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// One text input of the form shown by the terminal front end.
///
/// Each field becomes an `<input>` carrying the bootstrap selector's class,
/// so it is turned into a tag editor on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The `name` attribute. Tags submit as `<name>[]`.
    pub name: String,

    /// Label shown on the editor's border. Defaults to the name.
    #[serde(default)]
    pub label: Option<String>,

    /// The `id` attribute.
    #[serde(default)]
    pub id: Option<String>,

    /// Extra classes added next to the bootstrap class.
    #[serde(default)]
    pub class: Option<String>,

    /// Placeholder text shown while the field is empty.
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FieldSpec {
    /// Create a field with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            id: None,
            class: None,
            placeholder: None,
        }
    }

    /// Label to display for this field.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Validate this field.
    ///
    /// Checks that:
    /// - The name is non-empty and has no whitespace
    /// - The id, if set, has no whitespace
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "field name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "field name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if let Some(id) = &self.id {
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(ConfigError::ValidationError(format!(
                    "field '{}': id '{}' must be a single non-empty token",
                    self.name, id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = FieldSpec::new("labels");
        assert_eq!(field.name, "labels");
        assert_eq!(field.display_label(), "labels");
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_display_label_override() {
        let mut field = FieldSpec::new("labels");
        field.label = Some("Labels".to_string());
        assert_eq!(field.display_label(), "Labels");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = FieldSpec::new("").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let result = FieldSpec::new("my tags").validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot contain whitespace"));
    }

    #[test]
    fn test_bracketed_name_allowed() {
        assert!(FieldSpec::new("tags[]").validate().is_ok());
    }

    #[test]
    fn test_invalid_id_rejected() {
        let mut field = FieldSpec::new("tags");
        field.id = Some("a b".to_string());
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal() {
        let field: FieldSpec = toml::from_str("name = \"tags\"").unwrap();
        assert_eq!(field, FieldSpec::new("tags"));
    }
}
