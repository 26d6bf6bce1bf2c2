//! Test utilities and shared fixtures for Vibe Check.
//!
//! Enabled for unit tests and, through the `testing` feature, for the test
//! suites of the other workspace crates.

use crate::types::{ClassGroup, EventRecord, EventType};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Shorthand for building a record in tests.
pub fn record(timestamp: &str, emotion_code: i64, class_name: &str, event_type: EventType) -> EventRecord {
    EventRecord::new(timestamp, emotion_code, class_name, event_type)
}

/// Fixture data mirroring what the backend returns.
pub mod fixtures {
    use super::*;

    /// Three June 2024 records across two classes and both event types.
    pub fn june_records() -> Vec<EventRecord> {
        vec![
            record("01/06/2024 10:00", 1, "A", EventType::Checkin),
            record("02/06/2024 11:00", 1, "A", EventType::Checkin),
            record("03/06/2024 09:00", 2, "B", EventType::Checkout),
        ]
    }

    /// A class list including the placeholder rows the backend seeds.
    pub fn class_list() -> Vec<ClassGroup> {
        vec![
            ClassGroup::new(0, "Sem turma"),
            ClassGroup::new(3, "b"),
            ClassGroup::new(1, "A"),
            ClassGroup::new(2, "string"),
            ClassGroup::new(4, "C"),
        ]
    }
}
