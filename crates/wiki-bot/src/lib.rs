//! # Wiki Bot
//!
//! Example Discord bot gating slash commands behind guild roles.
//!
//! This is the main binary crate: it connects to the gateway with the Poise
//! framework built by `wiki-commands`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
