//! Conversion of the gateway's view of an invocation into filter snapshots.

use crate::framework::{Context, Error};
use crate::model::{GuildSnapshot, MemberSnapshot, Role};
use poise::serenity_prelude as serenity;
use tracing::debug;
use wiki_common::{GuildId, RoleId, UserId};

fn role_from(role: &serenity::Role) -> Role {
    Role::new(RoleId(role.id.get()), role.name.clone())
}

/// Builds a guild snapshot from the roles of a serenity guild.
pub fn guild_snapshot<'a>(
    guild_id: serenity::GuildId,
    name: Option<String>,
    roles: impl IntoIterator<Item = &'a serenity::Role>,
) -> GuildSnapshot {
    let snapshot = GuildSnapshot::new(GuildId(guild_id.get()), roles.into_iter().map(role_from));
    match name {
        Some(name) => snapshot.with_name(name),
        None => snapshot,
    }
}

/// Builds the snapshot of a guild member.
pub fn member_snapshot(member: &serenity::Member, guild: GuildSnapshot) -> MemberSnapshot {
    MemberSnapshot::in_guild(
        UserId(member.user.id.get()),
        member.display_name(),
        guild,
        member.roles.iter().map(|id| RoleId(id.get())),
    )
}

/// Reads the guild from the cache without holding the cache lock across awaits.
fn cached_guild(ctx: Context<'_>) -> Option<GuildSnapshot> {
    let guild = ctx.guild()?;
    Some(guild_snapshot(
        guild.id,
        Some(guild.name.clone()),
        guild.roles.values(),
    ))
}

/// Snapshot of the guild the command runs in, from the cache or else over HTTP.
async fn current_guild(
    ctx: Context<'_>,
    guild_id: serenity::GuildId,
) -> Result<GuildSnapshot, Error> {
    if let Some(snapshot) = cached_guild(ctx) {
        return Ok(snapshot);
    }

    debug!("Guild {} not cached, fetching its roles", guild_id);
    let roles = guild_id.roles(ctx.http()).await?;
    Ok(guild_snapshot(guild_id, None, roles.values()))
}

/// Captures the invoking user, with its guild membership when invoked in a guild.
///
/// A guild invocation whose member cannot be resolved is treated like a direct
/// message, which role-gated commands deny.
pub async fn invocation_actor(ctx: Context<'_>) -> Result<MemberSnapshot, Error> {
    let author = ctx.author();
    let direct = || MemberSnapshot::direct(UserId(author.id.get()), author.name.clone());

    let Some(guild_id) = ctx.guild_id() else {
        return Ok(direct());
    };

    let Some(member) = ctx.author_member().await else {
        debug!(
            "Could not resolve member {} in guild {}",
            author.id, guild_id
        );
        return Ok(direct());
    };

    let guild = current_guild(ctx, guild_id).await?;
    Ok(member_snapshot(&member, guild))
}
