//! # Vibe Check Common
//!
//! Shared types, utilities, and common functionality for Vibe Check.
//!
//! This crate provides the backend wire types (event records, classes,
//! emotions), the workspace error type, logging setup, and the date helpers
//! used by the dashboard aggregation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, VibeCheckError};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
