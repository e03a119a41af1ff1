//! Configuration loading utilities

use crate::{Config, Environment};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use wiki_common::{GuildId, WikiError};

/// Environment variable pointing at a configuration file.
pub const CONFIG_PATH_VAR: &str = "WIKI_BOT_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(WikiError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for WikiError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Unable to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |key| env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load_config`], reading overrides through `lookup`.
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        debug!("Reading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_overrides(&mut config, lookup)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from the first file found, falling back to defaults
    ///
    /// The search order is `WIKI_BOT_CONFIG_PATH`, `config.yaml`, `config.yml`.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_config(config_path);
        }

        for candidate in ["config.yaml", "config.yml"] {
            if Path::new(candidate).exists() {
                return Self::load_config(candidate);
            }
        }

        info!("No configuration file found, using defaults and environment");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup` to configuration
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(prefixes) = lookup("WIKI_BOT_PREFIXES") {
            config.discord.prefixes = split_list(&prefixes).map(str::to_string).collect();
        }

        if let Some(guilds) = lookup("WIKI_BOT_TEST_GUILDS") {
            config.discord.test_guild_ids = split_list(&guilds)
                .map(str::parse::<GuildId>)
                .collect::<Result<_, _>>()
                .map_err(|e| ConfigError::EnvParseError {
                    var: "WIKI_BOT_TEST_GUILDS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(environment) = lookup("WIKI_BOT_ENVIRONMENT") {
            config.environment =
                environment
                    .parse::<Environment>()
                    .map_err(|e| ConfigError::EnvParseError {
                        var: "WIKI_BOT_ENVIRONMENT".to_string(),
                        source: Box::new(e),
                    })?;
        }

        if let Some(level) = lookup("WIKI_BOT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
