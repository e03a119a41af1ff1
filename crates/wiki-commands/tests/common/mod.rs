//! Shared fixtures for the wiki-commands integration tests.

#![allow(dead_code)]

use wiki_commands::{
    CommandInvocation, CommandMetadata, GuildSnapshot, MemberSnapshot, RequiredRoles, Role,
    RequiredRolesFilter, CommandFilter,
};
use wiki_common::test_utils::discord_fixtures;
use wiki_common::{RoleId, UserId};

/// A guild where every id in `roles` exists.
pub fn guild_with(roles: &[RoleId]) -> GuildSnapshot {
    GuildSnapshot::new(
        discord_fixtures::test_guild_id(),
        roles.iter().map(|&id| Role::new(id, format!("role-{id}"))),
    )
    .with_name("Test guild")
}

/// A member of `guild` holding `held`.
pub fn member_of(guild: GuildSnapshot, held: &[RoleId]) -> MemberSnapshot {
    MemberSnapshot::in_guild(
        discord_fixtures::test_user_id(),
        "tester",
        guild,
        held.iter().copied(),
    )
}

/// A user invoking from direct messages.
pub fn direct_user() -> MemberSnapshot {
    direct_user_with(UserId(42))
}

/// A direct message user with the given id.
pub fn direct_user_with(user_id: UserId) -> MemberSnapshot {
    MemberSnapshot::direct(user_id, "dm-user")
}

/// Guild-only command metadata requiring `roles`.
pub fn gated(command: &str, roles: &[RoleId]) -> CommandMetadata {
    CommandMetadata::new(command)
        .guild_only(true)
        .with_required_roles(RequiredRoles::new(roles.iter().copied()))
}

/// Runs the required roles filter alone.
pub fn check(actor: &MemberSnapshot, metadata: &CommandMetadata) -> Option<String> {
    RequiredRolesFilter.check(&CommandInvocation::new(metadata.name(), actor), metadata)
}
