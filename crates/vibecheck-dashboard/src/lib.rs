//! # Vibe Check Dashboard
//!
//! Turns the backend's flat list of check-in/check-out answers into chart
//! data for the teacher dashboard.
//!
//! The core is [`TimeSeriesAggregator`]: a pure, single-pass grouping of
//! records by day, week or month with a numeric ordering of the resulting
//! period labels. The grouped points feed the plain-text export in
//! [`report`] and the SVG line chart in [`chart`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod chart;
pub mod period;
pub mod report;
pub mod traits;

pub use aggregator::*;
pub use chart::*;
pub use period::*;
pub use report::*;
pub use traits::*;
