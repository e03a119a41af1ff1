//! Live configuration shared by the running bot.

use crate::schema::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use wiki_common::WikiError;

/// Configuration readable from any command handler without locking.
///
/// Replacements are validated first; a rejected config leaves the current one
/// in place.
#[derive(Debug)]
pub struct ConfigCache {
    current: ArcSwap<Config>,
}

impl ConfigCache {
    /// Wraps an already validated configuration.
    pub fn new(config: Config) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Wraps a configuration that is already shared elsewhere.
    pub fn from_shared(config: Arc<Config>) -> Self {
        Self {
            current: ArcSwap::new(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Whether the bot currently runs in the development environment.
    pub fn is_dev(&self) -> bool {
        self.current.load().environment.is_dev()
    }

    /// Validates and installs `config`, returning the configuration it replaced.
    pub fn update(&self, config: Config) -> Result<Arc<Config>, WikiError> {
        config.validate()?;
        Ok(self.current.swap(Arc::new(config)))
    }
}
