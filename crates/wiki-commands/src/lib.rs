//! # Wiki Commands
//!
//! Slash commands and command filters for the wiki bot, built on Poise.
//!
//! The heart of the crate is [`filter::RequiredRolesFilter`], which denies a
//! command unless the invoking member holds every role attached to it. Filters
//! run through a [`filter::FilterChain`] installed as Poise's command check,
//! and denials are answered by the rejection handler in [`framework`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod clicker;
pub mod filter;
pub mod framework;
pub mod metadata;
pub mod model;
pub mod registry;
pub mod say;
pub mod staff_only;

pub use filter::*;
pub use framework::*;
pub use metadata::*;
pub use model::*;
pub use registry::*;
