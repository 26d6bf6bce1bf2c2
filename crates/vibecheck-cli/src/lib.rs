//! # Vibe Check CLI
//!
//! Argument parsing and command dispatch for the `vibecheck` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;

pub use cli::*;
pub use commands::run;
