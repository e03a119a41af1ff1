//! Default configuration values.

use crate::schema::{CommandsConfig, Config, DiscordConfig, Environment, PING_PREFIX};
use wiki_common::LoggingConfig;

/// Default custom status.
pub const DEFAULT_ACTIVITY: &str = "In Rust with ❤️";

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            discord: DiscordConfig::default(),
            commands: CommandsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefixes: vec![PING_PREFIX.to_string()],
            test_guild_ids: Vec::new(),
            owner_ids: Vec::new(),
            activity: DEFAULT_ACTIVITY.to_string(),
        }
    }
}
