//! Staff-only command, gated by the roles configured for it.

use crate::framework::{Context, Error};

/// Replies only to members holding the staff role
#[poise::command(slash_command, guild_only)]
pub async fn staff_only(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content("You are staff")
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
