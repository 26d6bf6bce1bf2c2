//! Period labels for the dashboard time axis and their ordering.

use chrono::NaiveDateTime;
use vibecheck_common::{simple_week_number, AggregationPeriod};

/// Prefix of week labels.
pub const WEEK_LABEL_PREFIX: &str = "Semana";

/// Label of the period `timestamp` falls into.
///
/// - `day` → `dd/MM`
/// - `month` → `MM/yyyy`
/// - `week` and `all` → `Semana {n}` (see [`simple_week_number`])
pub fn period_label(period: AggregationPeriod, timestamp: NaiveDateTime) -> String {
    match period {
        AggregationPeriod::Day => timestamp.format("%d/%m").to_string(),
        AggregationPeriod::Month => timestamp.format("%m/%Y").to_string(),
        AggregationPeriod::Week | AggregationPeriod::All => {
            format!("{WEEK_LABEL_PREFIX} {}", simple_week_number(timestamp))
        }
    }
}

/// Numeric ordering key derived from the shape of a period label.
///
/// - `Semana {n}` → `n` (0 when `n` is not a number)
/// - `MM/yyyy` → `year * 100 + month`
/// - `dd/MM` → `month * 100 + day`; the year is unknown, so days from
///   different years interleave by month and day
/// - anything else → 0
pub fn period_sort_key(label: &str) -> i64 {
    if let Some(rest) = label.strip_prefix(WEEK_LABEL_PREFIX) {
        return rest.trim().parse().unwrap_or(0);
    }

    let Some((first, second)) = label.split_once('/') else {
        return 0;
    };

    match (fixed_digits(first, 2), second.len()) {
        (Some(month), 4) => fixed_digits(second, 4).map_or(0, |year| year * 100 + month),
        (Some(day), 2) => fixed_digits(second, 2).map_or(0, |month| month * 100 + day),
        _ => 0,
    }
}

/// Parses `s` if it is exactly `width` ASCII digits.
fn fixed_digits(s: &str, width: usize) -> Option<i64> {
    if s.len() == width && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_period_labels() {
        let ts = at(2024, 6, 1, 10);
        assert_eq!(period_label(AggregationPeriod::Day, ts), "01/06");
        assert_eq!(period_label(AggregationPeriod::Month, ts), "06/2024");
        assert_eq!(period_label(AggregationPeriod::Week, ts), "Semana 23");
        assert_eq!(period_label(AggregationPeriod::All, ts), "Semana 23");
    }

    #[test]
    fn test_week_sort_key_is_numeric() {
        assert_eq!(period_sort_key("Semana 2"), 2);
        assert_eq!(period_sort_key("Semana 10"), 10);
        assert!(period_sort_key("Semana 2") < period_sort_key("Semana 10"));
        assert_eq!(period_sort_key("Semana"), 0);
        assert_eq!(period_sort_key("Semana x"), 0);
    }

    #[test]
    fn test_month_and_day_sort_keys() {
        assert_eq!(period_sort_key("06/2024"), 202_406);
        assert_eq!(period_sort_key("12/2023"), 202_312);
        assert_eq!(period_sort_key("01/06"), 601);
        assert_eq!(period_sort_key("31/12"), 1231);
    }

    #[test]
    fn test_day_sort_key_ignores_year() {
        // 30/12 of one year sorts after 02/01 of the next.
        assert!(period_sort_key("30/12") > period_sort_key("02/01"));
    }

    #[test]
    fn test_unrecognised_labels_sort_first() {
        assert_eq!(period_sort_key(""), 0);
        assert_eq!(period_sort_key("6/2024"), 0);
        assert_eq!(period_sort_key("2024/06"), 0);
        assert_eq!(period_sort_key("ab/cd"), 0);
        assert_eq!(period_sort_key("01/06/2024"), 0);
    }
}
