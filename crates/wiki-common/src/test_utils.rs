//! Test utilities and shared test helpers for the wiki bot.
//!
//! Enabled for dependent crates through the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests, capturing everything down to `trace`.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{GuildId, RoleId, UserId};

    /// Create a test guild ID.
    pub const fn test_guild_id() -> GuildId {
        GuildId(123_456_789_012_345_678)
    }

    /// Create a test user ID.
    pub const fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// The staff role used by the `staff_only` example command.
    pub const fn staff_role_id() -> RoleId {
        RoleId(1_322_683_021_924_499_516)
    }

    /// Create multiple test role IDs.
    pub fn test_role_ids(count: usize) -> Vec<RoleId> {
        (0..count as u64)
            .map(|i| RoleId(100_000_000_000_000_000 + i))
            .collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub const fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
"#
    }

    /// Create a full test configuration as YAML string.
    pub const fn full_config_yaml() -> &'static str {
        concat!(
            "environment: development\n",
            "\n",
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  prefixes: [\"<ping>\", \"!\"]\n",
            "  test_guild_ids: [123456789012345678]\n",
            "  owner_ids: [987654321098765432]\n",
            "  activity: \"In Rust with tests\"\n",
            "\n",
            "commands:\n",
            "  staff_role_id: 1322683021924499516\n",
            "  required_roles:\n",
            "    say: [100000000000000000, 100000000000000001]\n",
            "\n",
            "logging:\n",
            "  level: \"wiki_commands=trace,info\"\n",
            "  format: compact\n",
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use crate::{GuildId, RoleId, UserId};
    use proptest::prelude::*;

    /// Strategy for generating valid Discord guild IDs.
    pub fn guild_id_strategy() -> impl Strategy<Value = GuildId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(GuildId)
    }

    /// Strategy for generating valid Discord user IDs.
    pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(UserId)
    }

    /// Strategy for role IDs drawn from a small pool, so collisions between
    /// required, existing and held roles are frequent.
    pub fn role_id_strategy() -> impl Strategy<Value = RoleId> {
        (1u64..=16).prop_map(RoleId)
    }

    /// Strategy for a list of role IDs, duplicates allowed.
    pub fn role_list_strategy(max_len: usize) -> impl Strategy<Value = Vec<RoleId>> {
        prop::collection::vec(role_id_strategy(), 0..=max_len)
    }
}
