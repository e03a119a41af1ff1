//! Configuration validation.

use crate::schema::Config;
use std::fmt;

/// A single problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, collecting every issue instead of stopping at the first one.
    pub fn validate(config: &Config) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let discord = &config.discord;

        if discord.token.trim().is_empty() {
            issues.push(ValidationIssue::new("discord.token", "cannot be empty"));
        }

        if discord.prefixes.is_empty() {
            issues.push(ValidationIssue::new("discord.prefixes", "at least one prefix is required"));
        } else if discord.prefixes.iter().any(|p| p.trim().is_empty()) {
            issues.push(ValidationIssue::new("discord.prefixes", "prefixes cannot be blank"));
        }

        if discord.test_guild_ids.iter().any(|id| id.get() == 0) {
            issues.push(ValidationIssue::new("discord.test_guild_ids", "ids cannot be zero"));
        }

        if discord.owner_ids.iter().any(|id| id.get() == 0) {
            issues.push(ValidationIssue::new("discord.owner_ids", "ids cannot be zero"));
        }

        if config.environment.is_dev() && discord.test_guild_ids.is_empty() {
            issues.push(ValidationIssue::new(
                "discord.test_guild_ids",
                "at least one test guild is required in development",
            ));
        }

        if config.commands.staff_role_id.is_some_and(|id| id.get() == 0) {
            issues.push(ValidationIssue::new("commands.staff_role_id", "id cannot be zero"));
        }

        for (command, roles) in &config.commands.required_roles {
            if command.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    "commands.required_roles",
                    "command names cannot be blank",
                ));
            }
            if roles.iter().any(|id| id.get() == 0) {
                issues.push(ValidationIssue::new(
                    format!("commands.required_roles.{command}"),
                    "ids cannot be zero",
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment;
    use wiki_common::{GuildId, RoleId};

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_issues() {
        let mut config = Config::default();
        config.environment = Environment::Development;
        config.commands.staff_role_id = Some(RoleId(0));

        let issues = ConfigValidator::validate(&config).unwrap_err();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["discord.token", "discord.test_guild_ids", "commands.staff_role_id"]
        );
    }

    #[test]
    fn test_required_roles_entries_checked() {
        let mut config = valid_config();
        config
            .commands
            .required_roles
            .insert("say".to_string(), vec![RoleId(1), RoleId(0)]);

        let issues = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "commands.required_roles.say: ids cannot be zero");
    }

    #[test]
    fn test_prefixes_cannot_be_empty() {
        let mut config = valid_config();
        config.discord.prefixes.clear();

        let issues = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "discord.prefixes: at least one prefix is required"
        );
    }

    #[test]
    fn test_development_with_test_guild() {
        let mut config = valid_config();
        config.environment = Environment::Development;
        config.discord.test_guild_ids.push(GuildId(42));
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
