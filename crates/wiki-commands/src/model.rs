//! Guild and member model consumed by the command filters.
//!
//! Filters only see these traits, never serenity types: the adapter takes a
//! snapshot of the gateway state before a command runs, and tests build the
//! snapshots by hand.

use std::collections::{HashMap, HashSet};
use std::fmt;
use wiki_common::{GuildId, RoleId, UserId};

/// A role of a guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
    /// Stable role id.
    pub id: RoleId,
    /// Display name, may change over time.
    pub name: String,
}

impl Role {
    /// Creates a role.
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A guild, as far as the filters are concerned.
pub trait Group: fmt::Debug + Send + Sync {
    /// Guild id.
    fn id(&self) -> GuildId;

    /// Looks up one of the guild's current roles.
    fn role_by_id(&self, id: RoleId) -> Option<&Role>;
}

/// A user invoking a command, optionally as a member of a guild.
pub trait Actor: fmt::Debug + Send + Sync {
    /// User id.
    fn id(&self) -> UserId;

    /// Guild the actor is a member of, `None` in direct messages.
    fn group(&self) -> Option<&dyn Group>;

    /// Whether the actor currently holds `role`.
    fn has_role(&self, role: RoleId) -> bool;
}

/// Point-in-time copy of a guild's roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    /// Guild id.
    pub id: GuildId,
    /// Guild name, when known.
    pub name: Option<String>,
    roles: HashMap<RoleId, Role>,
}

impl GuildSnapshot {
    /// Creates a snapshot from the guild's roles.
    pub fn new(id: GuildId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            name: None,
            roles: roles.into_iter().map(|role| (role.id, role)).collect(),
        }
    }

    /// Sets the guild name used in log records.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// All roles of the guild.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }
}

impl Group for GuildSnapshot {
    fn id(&self) -> GuildId {
        self.id
    }

    fn role_by_id(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }
}

impl fmt::Display for GuildSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Point-in-time copy of the invoking user and, in guilds, its membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    /// User id.
    pub user_id: UserId,
    /// Name used in log records.
    pub name: String,
    guild: Option<GuildSnapshot>,
    roles: HashSet<RoleId>,
}

impl MemberSnapshot {
    /// A user outside of any guild, such as in direct messages.
    pub fn direct(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            guild: None,
            roles: HashSet::new(),
        }
    }

    /// A guild member holding `roles`.
    pub fn in_guild(
        user_id: UserId,
        name: impl Into<String>,
        guild: GuildSnapshot,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            guild: Some(guild),
            roles: roles.into_iter().collect(),
        }
    }

    /// The member's guild.
    pub const fn guild(&self) -> Option<&GuildSnapshot> {
        self.guild.as_ref()
    }
}

impl Actor for MemberSnapshot {
    fn id(&self) -> UserId {
        self.user_id
    }

    fn group(&self) -> Option<&dyn Group> {
        self.guild.as_ref().map(|g| g as &dyn Group)
    }

    fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

impl fmt::Display for MemberSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.user_id)
    }
}

/// One command execution attempt.
#[derive(Debug, Clone, Copy)]
pub struct CommandInvocation<'a> {
    command: &'a str,
    actor: &'a dyn Actor,
}

impl<'a> CommandInvocation<'a> {
    /// Creates an invocation of `command` by `actor`.
    pub const fn new(command: &'a str, actor: &'a dyn Actor) -> Self {
        Self { command, actor }
    }

    /// Qualified name of the invoked command.
    pub const fn command(&self) -> &'a str {
        self.command
    }

    /// The invoking user.
    pub const fn actor(&self) -> &'a dyn Actor {
        self.actor
    }

    /// Guild the command was invoked in, if any.
    pub fn group(&self) -> Option<&'a dyn Group> {
        self.actor.group()
    }
}
