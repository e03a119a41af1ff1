//! Lookup of command metadata by qualified command name.

use crate::metadata::{CommandMetadata, RequiredRoles};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, warn};
use wiki_config::CommandsConfig;

/// Name of the example command gated behind the staff role.
pub const STAFF_ONLY_COMMAND: &str = "staff_only";

/// Command metadata, filled at registration time and read on every invocation.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandMetadata>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from the configured role requirements.
    pub fn from_config(config: &CommandsConfig) -> Self {
        let mut registry = Self::new();

        if let Some(staff_role) = config.staff_role_id {
            registry.require_roles(STAFF_ONLY_COMMAND, RequiredRoles::new([staff_role]));
        }

        for (command, roles) in &config.required_roles {
            registry.require_roles(command, RequiredRoles::new(roles.iter().copied()));
        }

        registry
    }

    /// Inserts metadata, returning the entry it replaced.
    pub fn register(&mut self, metadata: CommandMetadata) -> Option<CommandMetadata> {
        self.commands.insert(metadata.name().to_string(), metadata)
    }

    /// Attaches role requirements to `command`, replacing any previous ones.
    pub fn require_roles(&mut self, command: &str, roles: RequiredRoles) {
        debug!("Command '{}' requires roles {:?}", command, roles.roles());
        self.commands
            .entry(command.to_string())
            .or_insert_with(|| CommandMetadata::new(command))
            .set_required_roles(roles);
    }

    /// Metadata registered for `command`.
    pub fn get(&self, command: &str) -> Option<&CommandMetadata> {
        self.commands.get(command)
    }

    /// Metadata for `command`, a bare description when nothing was registered.
    pub fn metadata_for<'a>(&'a self, command: &str) -> Cow<'a, CommandMetadata> {
        self.get(command)
            .map_or_else(|| Cow::Owned(CommandMetadata::new(command)), Cow::Borrowed)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Records which of the framework's commands are guild-only and warns about
    /// registered names matching no command.
    ///
    /// `commands` yields `(qualified name, guild only)` pairs. Returns the
    /// unmatched names, sorted.
    pub fn sync_with_commands<'a, I>(&mut self, commands: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut seen = Vec::new();
        for (name, guild_only) in commands {
            seen.push(name);
            match self.commands.get_mut(name) {
                Some(metadata) => metadata.set_guild_only(guild_only),
                None => {
                    self.register(CommandMetadata::new(name).guild_only(guild_only));
                }
            }
        }

        let mut unknown: Vec<String> = self
            .commands
            .keys()
            .filter(|name| !seen.contains(&name.as_str()))
            .cloned()
            .collect();
        unknown.sort();

        for name in &unknown {
            warn!("Role requirements configured for unknown command '{}'", name);
        }

        for metadata in self.commands.values() {
            if metadata.find_required_roles().is_some() && !metadata.is_guild_only() {
                warn!(
                    "Command '{}' has required roles but is not guild-only, direct message invocations will be denied",
                    metadata.name()
                );
            }
        }

        unknown
    }
}
