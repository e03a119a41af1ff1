//! Integration tests for wiki-commands.
//!
//! These tests drive the required roles filter through the registry and the
//! filter chain, the way the command check does before each command.

mod common;

use common::{check, direct_user, direct_user_with, gated, guild_with, member_of};
use proptest::prelude::*;
use std::collections::BTreeMap;
use wiki_commands::{
    CommandInvocation, CommandMetadata, CommandRegistry, FilterChain, MISSING_ROLES_MESSAGE,
    STAFF_ONLY_COMMAND,
};
use wiki_common::test_utils::{discord_fixtures, init_test_logging, property_testing};
use wiki_common::RoleId;
use wiki_config::CommandsConfig;

#[test]
fn test_command_without_requirement_is_allowed_anywhere() {
    init_test_logging();
    let metadata = CommandMetadata::new("say");

    assert_eq!(check(&direct_user(), &metadata), None);
    assert_eq!(check(&member_of(guild_with(&[]), &[]), &metadata), None);
}

#[test]
fn test_empty_requirement_is_allowed_for_any_actor() {
    let metadata = gated("say", &[]);
    assert_eq!(check(&member_of(guild_with(&[]), &[]), &metadata), None);
    assert_eq!(check(&direct_user(), &metadata), None);
}

#[test]
fn test_direct_message_is_denied() {
    init_test_logging();
    let staff = discord_fixtures::staff_role_id();

    assert_eq!(
        check(&direct_user(), &gated(STAFF_ONLY_COMMAND, &[staff])).as_deref(),
        Some(MISSING_ROLES_MESSAGE)
    );
}

#[test]
fn test_member_holding_all_roles_is_allowed() {
    let roles = discord_fixtures::test_role_ids(3);
    let member = member_of(guild_with(&roles), &roles);

    assert_eq!(check(&member, &gated("say", &roles)), None);
}

#[test]
fn test_member_missing_a_role_is_denied() {
    init_test_logging();
    let roles = discord_fixtures::test_role_ids(3);
    let member = member_of(guild_with(&roles), &roles[..2]);

    assert_eq!(
        check(&member, &gated("say", &roles)).as_deref(),
        Some(MISSING_ROLES_MESSAGE)
    );
}

#[test]
fn test_role_deleted_from_guild_is_denied() {
    init_test_logging();
    let roles = discord_fixtures::test_role_ids(2);
    // The member still lists the deleted role, the guild no longer has it
    let member = member_of(guild_with(&roles[..1]), &roles);

    assert_eq!(
        check(&member, &gated("say", &roles)).as_deref(),
        Some(MISSING_ROLES_MESSAGE)
    );
}

#[test]
fn test_registry_and_chain_gate_staff_command() {
    init_test_logging();
    let staff = discord_fixtures::staff_role_id();
    let config = CommandsConfig {
        staff_role_id: Some(staff),
        required_roles: BTreeMap::new(),
    };
    let mut registry = CommandRegistry::from_config(&config);
    let unknown = registry.sync_with_commands([(STAFF_ONLY_COMMAND, true), ("say", true)]);
    assert!(unknown.is_empty());

    let chain = FilterChain::with_defaults();
    let guild = guild_with(&[staff]);
    let staff_member = member_of(guild.clone(), &[staff]);
    let visitor = member_of(guild, &[]);

    let metadata = registry.metadata_for(STAFF_ONLY_COMMAND);
    assert_eq!(
        chain.evaluate(&CommandInvocation::new(STAFF_ONLY_COMMAND, &staff_member), &metadata),
        None
    );

    let denial = chain
        .evaluate(&CommandInvocation::new(STAFF_ONLY_COMMAND, &visitor), &metadata)
        .unwrap();
    assert_eq!(denial.reason, MISSING_ROLES_MESSAGE);

    let say = registry.metadata_for("say");
    assert_eq!(chain.evaluate(&CommandInvocation::new("say", &visitor), &say), None);
}

proptest! {
    #[test]
    fn prop_allowed_iff_every_required_role_exists_and_is_held(
        required in property_testing::role_list_strategy(6),
        existing in property_testing::role_list_strategy(12),
        held in property_testing::role_list_strategy(12),
    ) {
        let member = member_of(guild_with(&existing), &held);
        let expected = required
            .iter()
            .all(|id| existing.contains(id) && held.contains(id));

        let outcome = check(&member, &gated("say", &required));
        prop_assert_eq!(outcome.is_none(), expected);
        if let Some(message) = outcome {
            prop_assert_eq!(message, MISSING_ROLES_MESSAGE);
        }
    }

    #[test]
    fn prop_evaluation_is_idempotent(
        required in property_testing::role_list_strategy(6),
        held in property_testing::role_list_strategy(12),
    ) {
        let all: Vec<RoleId> = (1..=16).map(RoleId).collect();
        let member = member_of(guild_with(&all), &held);
        let metadata = gated("say", &required);

        prop_assert_eq!(check(&member, &metadata), check(&member, &metadata));
    }

    #[test]
    fn prop_requirement_order_does_not_matter(
        required in property_testing::role_list_strategy(6),
        held in property_testing::role_list_strategy(12),
    ) {
        let all: Vec<RoleId> = (1..=16).map(RoleId).collect();
        let member = member_of(guild_with(&all), &held);
        let mut reversed = required.clone();
        reversed.reverse();

        prop_assert_eq!(
            check(&member, &gated("say", &required)),
            check(&member, &gated("say", &reversed))
        );
    }

    #[test]
    fn prop_direct_messages_are_denied_for_gated_commands(
        user_id in property_testing::user_id_strategy(),
        required in prop::collection::vec(property_testing::role_id_strategy(), 1..=6),
    ) {
        prop_assert!(check(&direct_user_with(user_id), &gated("say", &required)).is_some());
    }
}
