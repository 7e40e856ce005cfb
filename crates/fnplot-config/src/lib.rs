//! # fnplot config
//!
//! Settings that new plots pick up as their defaults: frame size, fonts,
//! palette, export quality, surface appearance and viewer command.
//!
//! Settings are read from TOML, overridden from `FNPLOT_*` environment
//! variables, validated, and published through a lock-free cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
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
