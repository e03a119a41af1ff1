//! # Wiki Common
//!
//! Shared types, errors and logging setup for the wiki bot.
//!
//! This crate provides the foundational types used across the other crates
//! of the workspace: Discord id newtypes, the application error type and the
//! tracing subscriber setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, WikiError};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use types::*;
