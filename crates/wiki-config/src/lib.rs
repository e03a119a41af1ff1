//! # Wiki Config
//!
//! Type-safe configuration management for the wiki bot.
//!
//! This crate provides YAML configuration loading with environment variable
//! overrides, validation, and a lock-free cache for atomic updates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
