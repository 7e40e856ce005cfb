//! # fnplot common
//!
//! Shared error taxonomy, logging bootstrap and test helpers used by every
//! crate in the fnplot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{PlotError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
