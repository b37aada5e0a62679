//! Centralized error types for Tagfield.
//!
//! The tag editor itself never fails; these errors cover the application
//! around it (configuration, terminal, selector setup). All error types use
//! `thiserror`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::dom::SelectorError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The bootstrap selector could not be parsed.
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),

    /// Editor options passed on the command line could not be parsed.
    #[error("invalid editor options: {0}")]
    Options(#[from] serde_json::Error),

    /// IO errors (file system, terminal IO).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Selector(e) => format!("The field selector is not usable: {}", e),
            AppError::Options(_) => {
                "Editor options must be a JSON object, e.g. '{\"maxHeight\": 120}'.".to_string()
            }
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_critical() {
            2
        } else {
            1
        }
    }

    /// Check if this error prevents the application from starting.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Selector(_) | AppError::Options(_) | AppError::Terminal(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the config file or pass --config with a different path.")
            }
            AppError::Selector(_) => Some("Use a simple selector such as '.tagfield' or 'input#tags'."),
            AppError::Options(_) => Some("Check the JSON passed to --options."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
