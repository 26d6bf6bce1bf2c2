//! Date utilities for backend timestamps.

use crate::error::{Result, VibeCheckError};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// `chrono` format of backend timestamps (`dd/MM/yyyy HH:mm`).
pub const EVENT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Parses a backend timestamp into a local, timezone-less date-time.
pub fn parse_event_timestamp(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, EVENT_TIMESTAMP_FORMAT)
        .map_err(|e| VibeCheckError::timestamp(input, Some(e)))
}

/// Formats a date-time the way the backend serializes it.
pub fn format_event_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(EVENT_TIMESTAMP_FORMAT).to_string()
}

/// Week number used by the dashboard's `Semana {n}` labels.
///
/// `ceil((elapsed_days + weekday(Jan 1) + 1) / 7)` where `elapsed_days` is the
/// fractional number of days since January 1st 00:00 of the same year and the
/// weekday counts Sunday as 0. This is not ISO-8601: the time of day matters,
/// so the last day of a week can roll into the next number after midnight.
pub fn simple_week_number(timestamp: NaiveDateTime) -> u32 {
    let year_start = NaiveDate::from_ymd_opt(timestamp.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(timestamp);
    let elapsed = u64::try_from((timestamp - year_start).num_seconds()).unwrap_or(0);
    let offset = u64::from(year_start.weekday().num_days_from_sunday()) + 1;

    let week = (elapsed + offset * SECONDS_PER_DAY).div_ceil(SECONDS_PER_WEEK);
    u32::try_from(week).unwrap_or(u32::MAX)
}
