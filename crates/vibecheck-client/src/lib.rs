//! # Vibe Check Client
//!
//! Everything between the terminal and the backend: the HTTP client for
//! the backend API, a small session store with expiring values, and the
//! screen flows (dashboard, class roster, code release, student check-in)
//! built on top of them.
//!
//! Flows talk to the backend through the [`Backend`] trait so they can be
//! exercised without a server.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod backend;
pub mod dashboard;
pub mod release;
pub mod roster;
pub mod session;
pub mod student;

pub use api::*;
pub use backend::*;
pub use dashboard::*;
pub use release::*;
pub use roster::*;
pub use session::*;
pub use student::*;
