//! Command filters run before a command executes.
//!
//! A filter either lets the invocation through (`None`) or denies it with a
//! message shown to the user. Global filters run for every command, the
//! others only for commands that opted in through their
//! [`CommandMetadata`](crate::metadata::CommandMetadata).

use crate::metadata::{CommandMetadata, REQUIRED_ROLES_FILTER};
use crate::model::{Actor, CommandInvocation, Group, Role};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};
use wiki_common::RoleId;

/// Message shown to users lacking roles, whatever the exact cause.
pub const MISSING_ROLES_MESSAGE: &str = "You are missing required roles";

/// A check deciding whether a command invocation may proceed.
pub trait CommandFilter: Send + Sync {
    /// Unique name, referenced by command metadata for non-global filters.
    fn name(&self) -> &str;

    /// Whether the filter applies to every command.
    fn is_global(&self) -> bool;

    /// Returns the denial message, or `None` to allow the invocation.
    fn check(&self, invocation: &CommandInvocation<'_>, metadata: &CommandMetadata)
        -> Option<String>;
}

/// A required role the actor does not satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRole<'a> {
    /// The role no longer exists in the guild.
    Unknown(RoleId),
    /// The role exists but the actor does not hold it.
    NotHeld(&'a Role),
}

impl MissingRole<'_> {
    /// Id of the missing role.
    pub const fn id(&self) -> RoleId {
        match self {
            Self::Unknown(id) => *id,
            Self::NotHeld(role) => role.id,
        }
    }
}

impl fmt::Display for MissingRole<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown role {id}"),
            Self::NotHeld(role) => write!(f, "{role}"),
        }
    }
}

/// Lists the required roles `actor` is missing in `group`, in requirement order.
///
/// Ids that do not resolve to a role of the guild count as missing.
pub fn missing_roles<'g>(
    required: &[RoleId],
    actor: &dyn Actor,
    group: &'g dyn Group,
) -> Vec<MissingRole<'g>> {
    required
        .iter()
        .filter_map(|&id| match group.role_by_id(id) {
            None => {
                warn!("Could not find role with ID {} in guild {}", id, group.id());
                Some(MissingRole::Unknown(id))
            }
            Some(role) if !actor.has_role(role.id) => Some(MissingRole::NotHeld(role)),
            Some(_) => None,
        })
        .collect()
}

/// Denies commands with role requirements unless the member holds all of them.
///
/// Not global: only commands with [`RequiredRoles`](crate::metadata::RequiredRoles)
/// attached are checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequiredRolesFilter;

impl CommandFilter for RequiredRolesFilter {
    fn name(&self) -> &str {
        REQUIRED_ROLES_FILTER
    }

    fn is_global(&self) -> bool {
        false
    }

    fn check(
        &self,
        invocation: &CommandInvocation<'_>,
        metadata: &CommandMetadata,
    ) -> Option<String> {
        let required = metadata.find_required_roles()?;
        if required.is_empty() {
            return None;
        }

        let actor = invocation.actor();
        let Some(group) = invocation.group() else {
            warn!(
                "Required roles can only be used on guild-only commands: {}",
                metadata.name()
            );
            return Some(MISSING_ROLES_MESSAGE.to_string());
        };

        let missing = missing_roles(required.roles(), actor, group);
        if !missing.is_empty() {
            trace!(
                user_id = %actor.id(),
                guild_id = %group.id(),
                command = metadata.name(),
                "Denied access as they are missing required roles: {:?}",
                missing.iter().map(ToString::to_string).collect::<Vec<_>>()
            );
            return Some(MISSING_ROLES_MESSAGE.to_string());
        }

        None
    }
}

/// Errors raised while assembling a [`FilterChain`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Two filters share a name.
    #[error("A filter named '{0}' is already registered")]
    DuplicateName(String),
}

/// A denied invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Denial {
    /// Name of the filter that denied the invocation.
    pub filter: String,
    /// Message for the user.
    pub reason: String,
}

/// Ordered set of filters evaluated before each command.
#[derive(Default, Clone)]
pub struct FilterChain {
    filters: Vec<Arc<dyn CommandFilter>>,
}

impl FilterChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The filters shipped with the bot.
    pub fn with_defaults() -> Self {
        Self {
            filters: vec![Arc::new(RequiredRolesFilter)],
        }
    }

    /// Appends a filter, rejecting duplicate names.
    pub fn add(&mut self, filter: impl CommandFilter + 'static) -> Result<(), FilterError> {
        if self.filters.iter().any(|f| f.name() == filter.name()) {
            return Err(FilterError::DuplicateName(filter.name().to_string()));
        }
        self.filters.push(Arc::new(filter));
        Ok(())
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filter is registered.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether any filter would run for a command described by `metadata`.
    pub fn applies_to(&self, metadata: &CommandMetadata) -> bool {
        self.filters.iter().any(|f| Self::applies(f.as_ref(), metadata))
    }

    fn applies(filter: &dyn CommandFilter, metadata: &CommandMetadata) -> bool {
        filter.is_global() || metadata.uses_filter(filter.name())
    }

    /// Runs the applicable filters in registration order; the first denial wins.
    pub fn evaluate(
        &self,
        invocation: &CommandInvocation<'_>,
        metadata: &CommandMetadata,
    ) -> Option<Denial> {
        self.filters
            .iter()
            .filter(|f| Self::applies(f.as_ref(), metadata))
            .find_map(|f| {
                f.check(invocation, metadata).map(|reason| {
                    debug!(
                        "Filter '{}' denied '{}' for user {}",
                        f.name(),
                        invocation.command(),
                        invocation.actor().id()
                    );
                    Denial {
                        filter: f.name().to_string(),
                        reason,
                    }
                })
            })
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}
