//! Error types and utilities for the wiki bot

use thiserror::Error;

/// Result type alias for wiki bot operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Main error type for wiki bot operations
#[derive(Error, Debug)]
pub enum WikiError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors for configuration values or user input
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },

    /// Logging setup errors
    #[error("Logging error: {message}")]
    Logging {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WikiError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new logging error with source
    pub fn logging_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}
