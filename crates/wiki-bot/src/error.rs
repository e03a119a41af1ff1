//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use wiki_common::WikiError;
use wiki_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] WikiError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

impl From<ConfigError> for BotError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.into())
    }
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
