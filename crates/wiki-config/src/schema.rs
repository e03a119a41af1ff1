//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wiki_common::{GuildId, LoggingConfig, RoleId, UserId, WikiError};

/// Main configuration structure for the wiki bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment environment.
    pub environment: Environment,
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Per-command settings.
    pub commands: CommandsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Deployment environment, switches a few development conveniences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Commands are registered in test guilds and error details are shown.
    Development,
    /// Commands are registered globally.
    #[default]
    Production,
}

impl Environment {
    /// Whether this is the development environment.
    pub const fn is_dev(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::str::FromStr for Environment {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(WikiError::validation_field(
                format!("unknown environment '{other}'"),
                "environment",
            )),
        }
    }
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Text command prefixes, `<ping>` enables mentioning the bot as a prefix.
    pub prefixes: Vec<String>,
    /// Guilds in which commands are registered during development.
    pub test_guild_ids: Vec<GuildId>,
    /// Bot owners, in addition to the application owners.
    pub owner_ids: Vec<UserId>,
    /// Custom status shown on the bot's profile.
    pub activity: String,
}

/// Marker in [`DiscordConfig::prefixes`] enabling mention-as-prefix.
pub const PING_PREFIX: &str = "<ping>";

impl DiscordConfig {
    /// Whether mentioning the bot works as a prefix.
    pub fn use_ping_as_prefix(&self) -> bool {
        self.prefixes.iter().any(|p| p == PING_PREFIX)
    }

    /// Literal prefixes, without the ping marker.
    pub fn literal_prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes
            .iter()
            .map(String::as_str)
            .filter(|p| *p != PING_PREFIX)
    }
}

/// Per-command access settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Role required by the `staff_only` command.
    pub staff_role_id: Option<RoleId>,
    /// Additional required roles, keyed by command name.
    pub required_roles: BTreeMap<String, Vec<RoleId>>,
}

impl Config {
    /// Validates the configuration, reporting every issue found at once.
    pub fn validate(&self) -> Result<(), WikiError> {
        crate::validator::ConfigValidator::validate(self).map_err(|issues| {
            let message = issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            WikiError::validation(message)
        })
    }
}
