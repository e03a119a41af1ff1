//! Gateway connection using the Poise framework.

use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;
use wiki_commands::build_framework;
use wiki_config::Config;

/// Main bot structure.
#[derive(Debug)]
pub struct WikiBot {
    config: Arc<Config>,
}

impl WikiBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Non-privileged intents plus voice states.
    pub fn intents() -> serenity::GatewayIntents {
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_VOICE_STATES
    }

    /// Cache settings; messages are never cached.
    pub fn cache_settings() -> ::serenity::cache::Settings {
        let mut settings = ::serenity::cache::Settings::default();
        settings.max_messages = 0;
        settings
    }

    /// Custom status shown on the bot's profile.
    pub fn activity(&self) -> serenity::ActivityData {
        serenity::ActivityData::custom(self.config.discord.activity.clone())
    }

    /// Connects to the gateway and runs until the client stops.
    pub async fn start(&self) -> BotResult<()> {
        let framework = build_framework(Arc::clone(&self.config));

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, Self::intents())
            .framework(framework)
            .activity(self.activity())
            .cache_settings(Self::cache_settings())
            .await?;

        info!(
            "Starting gateway connection ({:?} environment)",
            self.config.environment
        );
        client.start().await?;
        Ok(())
    }
}
