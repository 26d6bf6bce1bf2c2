//! Grouping of event records into dashboard time-series points

use crate::period::{period_label, period_sort_key};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use vibecheck_common::{
    parse_event_timestamp, AggregationPeriod, Emotion, EventRecord, EventType, Result,
    ALL_SELECTION,
};

/// Key under which a point's period label is serialized.
pub const PERIOD_KEY: &str = "week";

/// Per-emotion tally inside a [`GroupedPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionCount {
    /// The emotion being counted.
    pub emotion: Emotion,
    /// Number of matching records with this emotion in the period.
    pub count: u32,
}

/// One point on the dashboard time axis.
///
/// Emotions appear in the order they were first seen inside the period and
/// only when their count is at least one. Serializes as a flat map with the
/// label under `"week"` followed by one key per emotion label, which is the
/// shape the dashboard chart consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedPoint {
    label: String,
    counts: Vec<EmotionCount>,
}

impl GroupedPoint {
    fn new(label: String) -> Self {
        Self {
            label,
            counts: Vec::new(),
        }
    }

    fn increment(&mut self, emotion: Emotion) {
        match self.counts.iter_mut().find(|c| c.emotion == emotion) {
            Some(entry) => entry.count += 1,
            None => self.counts.push(EmotionCount { emotion, count: 1 }),
        }
    }

    /// Period label (`dd/MM`, `MM/yyyy` or `Semana n`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Emotion tallies in first-seen order.
    pub fn counts(&self) -> &[EmotionCount] {
        &self.counts
    }

    /// Count for `emotion`, or `None` when it never occurred in this period.
    pub fn count(&self, emotion: Emotion) -> Option<u32> {
        self.counts
            .iter()
            .find(|c| c.emotion == emotion)
            .map(|c| c.count)
    }

    /// Sum of all emotion counts.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

impl Serialize for GroupedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry(PERIOD_KEY, &self.label)?;
        for entry in &self.counts {
            map.serialize_entry(entry.emotion.label(), &entry.count)?;
        }
        map.end()
    }
}

/// Restricts which records take part in an aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only records of this class, matched exactly.
    pub class_name: Option<String>,
    /// Keep only records of this event type.
    pub event_type: Option<EventType>,
}

impl RecordFilter {
    /// Filter that keeps every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one class.
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Restricts to one event type.
    #[must_use]
    pub const fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Builds a filter from dashboard selector values, where a missing or
    /// `"all"` value means no restriction on that field.
    pub fn from_selection(class_name: Option<&str>, event_type: Option<&str>) -> Result<Self> {
        let class_name = class_name
            .filter(|name| !name.eq_ignore_ascii_case(ALL_SELECTION))
            .map(str::to_string);
        let event_type = event_type
            .filter(|value| !value.eq_ignore_ascii_case(ALL_SELECTION))
            .map(str::parse::<EventType>)
            .transpose()?;

        Ok(Self {
            class_name,
            event_type,
        })
    }

    /// Whether `record` passes both restrictions.
    pub fn matches(&self, record: &EventRecord) -> bool {
        self.class_name
            .as_deref()
            .map_or(true, |name| record.class_name == name)
            && self
                .event_type
                .map_or(true, |event_type| record.event_type == event_type)
    }
}

/// Counters describing what an aggregation run did with its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Records received.
    pub total: usize,
    /// Records rejected by the filter.
    pub filtered_out: usize,
    /// Records dropped because their timestamp could not be parsed.
    pub malformed_timestamps: usize,
    /// Records dropped because their emotion code is unknown.
    pub unknown_emotions: usize,
}

impl AggregationStats {
    /// Records that contributed to a count.
    pub const fn counted(&self) -> usize {
        self.total - self.filtered_out - self.malformed_timestamps - self.unknown_emotions
    }
}

/// Points plus the counters of the run that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationOutcome {
    /// Grouped points in period order.
    pub points: Vec<GroupedPoint>,
    /// What happened to the input records.
    pub stats: AggregationStats,
}

/// Groups event records into ordered per-period emotion counts.
///
/// Aggregation is a pure, single pass over the input. The result depends
/// only on the records, the period and the filter; running it twice yields
/// identical points.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesAggregator {
    period: AggregationPeriod,
    filter: RecordFilter,
}

impl TimeSeriesAggregator {
    /// Aggregator for `period` with no filtering.
    pub fn new(period: AggregationPeriod) -> Self {
        Self {
            period,
            filter: RecordFilter::all(),
        }
    }

    /// Replaces the record filter.
    #[must_use]
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The period labels are derived for.
    pub const fn period(&self) -> AggregationPeriod {
        self.period
    }

    /// The active record filter.
    pub const fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Groups `records` into points ordered by period.
    pub fn aggregate(&self, records: &[EventRecord]) -> Vec<GroupedPoint> {
        self.aggregate_with_stats(records).points
    }

    /// Like [`aggregate`](Self::aggregate), also reporting dropped records.
    #[instrument(skip(self, records), fields(period = %self.period, records = records.len()))]
    pub fn aggregate_with_stats(&self, records: &[EventRecord]) -> AggregationOutcome {
        let mut stats = AggregationStats {
            total: records.len(),
            ..AggregationStats::default()
        };
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut points: Vec<GroupedPoint> = Vec::new();

        for record in records {
            if !self.filter.matches(record) {
                stats.filtered_out += 1;
                continue;
            }

            let timestamp = match parse_event_timestamp(&record.timestamp) {
                Ok(timestamp) => timestamp,
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    stats.malformed_timestamps += 1;
                    continue;
                }
            };

            let Some(emotion) = record.emotion() else {
                debug!("Skipping record with unknown emotion code {}", record.emotion_code);
                stats.unknown_emotions += 1;
                continue;
            };

            let label = period_label(self.period, timestamp);
            let slot = *index.entry(label.clone()).or_insert_with(|| {
                points.push(GroupedPoint::new(label));
                points.len() - 1
            });
            points[slot].increment(emotion);
        }

        // Stable, so labels with equal keys keep first-encounter order.
        points.sort_by_key(|point| period_sort_key(&point.label));

        debug!(
            "Aggregated {} of {} records into {} points",
            stats.counted(),
            stats.total,
            points.len()
        );

        AggregationOutcome { points, stats }
    }
}

/// Groups `records` by `period`, keeping only those matching the optional
/// class and event type restrictions.
pub fn aggregate(
    records: &[EventRecord],
    period: AggregationPeriod,
    class_filter: Option<&str>,
    type_filter: Option<EventType>,
) -> Vec<GroupedPoint> {
    let filter = RecordFilter {
        class_name: class_filter.map(str::to_string),
        event_type: type_filter,
    };
    TimeSeriesAggregator::new(period)
        .with_filter(filter)
        .aggregate(records)
}
