//! Integration tests for wiki-config crate.

use wiki_common::test_utils::config_fixtures;
use wiki_common::RoleId;
use wiki_config::{Config, ConfigCache};

fn parse(yaml: &str) -> Config {
    serde_yaml::from_str(yaml).expect("fixture should parse")
}

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Default config should fail validation due to the empty token
    assert!(config.validate().is_err());

    config.discord.token = "test_token".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_cache() {
    let config = parse(config_fixtures::minimal_config_yaml());
    let cache = ConfigCache::new(config.clone());

    assert_eq!(cache.get().discord.token, "test_token");

    let mut new_config = config;
    new_config.commands.staff_role_id = Some(RoleId(7));
    let previous = cache.update(new_config).unwrap();

    assert_eq!(previous.commands.staff_role_id, None);
    assert_eq!(cache.get().commands.staff_role_id, Some(RoleId(7)));
    assert!(!cache.is_dev());
}

#[test]
fn test_config_cache_rejects_invalid_update() {
    let cache = ConfigCache::new(parse(config_fixtures::minimal_config_yaml()));

    let mut invalid = Config::default();
    invalid.discord.token.clear();
    assert!(cache.update(invalid).is_err());

    // Previous configuration is kept
    assert_eq!(cache.get().discord.token, "test_token");
}

#[test]
fn test_config_cache_shares_snapshots() {
    let config = std::sync::Arc::new(parse(config_fixtures::full_config_yaml()));
    let cache = ConfigCache::from_shared(std::sync::Arc::clone(&config));

    assert!(std::sync::Arc::ptr_eq(&cache.get(), &config));
    assert!(cache.is_dev());
}

#[test]
fn test_round_trip_preserves_required_roles() {
    let config = parse(config_fixtures::full_config_yaml());
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(parse(&yaml), config);
}
