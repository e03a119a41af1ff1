//! Cookie clicker showing interactive buttons bound to the invoking user.

use crate::framework::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::collector::ComponentInteractionCollector;
use serenity::{ButtonStyle, CreateActionRow, CreateButton};
use std::time::{Duration, Instant};
use tracing::warn;

/// How long the button stays usable after the command ran.
///
/// Interaction tokens expire after 15 minutes and the final edit needs one.
pub const CLICKER_LIFETIME: Duration = Duration::from_secs(14 * 60);

/// Time left before `deadline`, `None` once it has passed.
pub fn remaining_until(deadline: Instant, now: Instant) -> Option<Duration> {
    deadline
        .checked_duration_since(now)
        .filter(|remaining| !remaining.is_zero())
}

/// Button label for `count` clicks.
pub fn cookie_label(count: u64) -> String {
    format!("{count} cookies")
}

fn cookie_row(button_id: &str, count: u64, disabled: bool) -> CreateActionRow {
    let button = CreateButton::new(button_id)
        .label(cookie_label(count))
        .emoji('🍪')
        .style(ButtonStyle::Primary)
        .disabled(disabled);

    CreateActionRow::Buttons(vec![button])
}

/// Cookie clickers
#[poise::command(slash_command, guild_only, subcommands("ephemeral"), subcommand_required)]
pub async fn clicker(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Creates a button you can click for the next 14 minutes
#[poise::command(slash_command, guild_only)]
pub async fn ephemeral(ctx: Context<'_>) -> Result<(), Error> {
    let button_id = format!("{}-cookie", ctx.id());
    let mut count = 0;

    let reply = ctx
        .send(poise::CreateReply::default().components(vec![cookie_row(&button_id, count, false)]))
        .await?;
    let message = reply.message().await?;
    let deadline = Instant::now() + CLICKER_LIFETIME;

    while let Some(remaining) = remaining_until(deadline, Instant::now()) {
        let Some(press) = ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .message_id(message.id)
            .timeout(remaining)
            .await
        else {
            break;
        };

        if press.data.custom_id != button_id {
            continue;
        }

        count += 1;
        let response = serenity::CreateInteractionResponseMessage::new()
            .components(vec![cookie_row(&button_id, count, false)]);
        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(response),
            )
            .await?;
    }

    let disabled = poise::CreateReply::default().components(vec![cookie_row(&button_id, count, true)]);
    if let Err(e) = reply.edit(ctx, disabled).await {
        warn!("Could not disable the cookie button after {} clicks: {}", count, e);
        return Ok(());
    }

    ctx.send(
        poise::CreateReply::default()
            .content(format!("You clicked {count} cookies!"))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
