//! Main entry point for the wiki bot.

use tracing::{error, info};
use wiki_bot::{BotResult, WikiBot};
use wiki_common::init_logging;
use wiki_config::ConfigLoader;

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = ConfigLoader::load()?;

    // Dropping the guard flushes the log file
    let _guard = init_logging(&config.logging)?;

    info!(
        "Starting wiki bot v{} with prefixes {:?}",
        env!("CARGO_PKG_VERSION"),
        config.discord.prefixes
    );

    let bot = WikiBot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot stopped: {}", e);
        return Err(e);
    }

    Ok(())
}
