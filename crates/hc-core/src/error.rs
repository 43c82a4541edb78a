//! Error types for hot-cold

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hot-cold
#[derive(Debug, Error)]
pub enum HotColdError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Chart rendering failed
    #[error("Chart rendering failed: {0}")]
    Render(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HotColdError>,
    },
}

impl HotColdError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HotColdError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for HotColdError {
    fn from(err: toml::de::Error) -> Self {
        HotColdError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for HotColdError {
    fn from(err: toml::ser::Error) -> Self {
        HotColdError::Toml(err.to_string())
    }
}

/// Result type alias for hot-cold
pub type Result<T> = std::result::Result<T, HotColdError>;
