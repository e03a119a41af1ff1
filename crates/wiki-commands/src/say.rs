//! Say command, echoing its argument back.

use crate::framework::{Context, Error};

/// Says something
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "What to say"]
    #[rest]
    content: String,
) -> Result<(), Error> {
    ctx.say(content).await?;
    Ok(())
}
