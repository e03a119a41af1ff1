//! Static command descriptions and the role requirements attached to them.

use std::sync::Arc;
use wiki_common::RoleId;

/// Name under which [`crate::filter::RequiredRolesFilter`] is registered.
pub const REQUIRED_ROLES_FILTER: &str = "required_roles";

/// Roles a member must all hold to run a command.
///
/// The list is shared and never mutated once built; attaching different
/// requirements to a command replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRoles {
    roles: Arc<[RoleId]>,
}

impl RequiredRoles {
    /// Creates a requirement on the given roles, in declaration order.
    pub fn new(roles: impl IntoIterator<Item = RoleId>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// The required role ids.
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    /// Whether no role is required.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Everything the filters know about a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    name: String,
    guild_only: bool,
    required_roles: Option<RequiredRoles>,
    filters: Vec<String>,
}

impl CommandMetadata {
    /// Metadata for `name` with no requirement and no opt-in filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guild_only: false,
            required_roles: None,
            filters: Vec::new(),
        }
    }

    /// Marks the command as usable in guilds only.
    #[must_use]
    pub fn guild_only(mut self, guild_only: bool) -> Self {
        self.guild_only = guild_only;
        self
    }

    /// Attaches role requirements, opting the command into the required roles filter.
    #[must_use]
    pub fn with_required_roles(mut self, roles: RequiredRoles) -> Self {
        self.set_required_roles(roles);
        self
    }

    /// Opts the command into a non-global filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.add_filter(filter.into());
        self
    }

    pub(crate) fn set_required_roles(&mut self, roles: RequiredRoles) {
        self.required_roles = Some(roles);
        self.add_filter(REQUIRED_ROLES_FILTER.to_string());
    }

    pub(crate) fn set_guild_only(&mut self, guild_only: bool) {
        self.guild_only = guild_only;
    }

    fn add_filter(&mut self, filter: String) {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
    }

    /// Qualified command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the command can only run in guilds.
    pub const fn is_guild_only(&self) -> bool {
        self.guild_only
    }

    /// The role requirements attached to the command, if any.
    pub const fn find_required_roles(&self) -> Option<&RequiredRoles> {
        self.required_roles.as_ref()
    }

    /// Whether the command opted into the non-global filter `name`.
    pub fn uses_filter(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f == name)
    }
}
