//! Teacher dashboard: selection handling and data loading.

use crate::backend::Backend;
use std::fmt;
use std::str::FromStr;
use tracing::{error, info, instrument, warn};
use vibecheck_common::{
    AggregationPeriod, ClassGroup, ClassId, EventType, Result, VibeCheckError, ALL_SELECTION,
};
use vibecheck_dashboard::{GroupedPoint, RecordFilter, TimeSeriesAggregator};

/// Class selector value meaning "records without a chosen class".
pub const NO_CLASS_SELECTION: &str = "none";

/// Message shown when dashboard data cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Erro ao carregar dados";

/// Value of the dashboard class selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassSelection {
    /// Every class.
    #[default]
    All,
    /// No class chosen.
    None,
    /// One class by id.
    Id(ClassId),
}

impl FromStr for ClassSelection {
    type Err = VibeCheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            all if all.eq_ignore_ascii_case(ALL_SELECTION) => Ok(Self::All),
            none if none.eq_ignore_ascii_case(NO_CLASS_SELECTION) => Ok(Self::None),
            other => other.parse().map(Self::Id).map_err(|_| {
                VibeCheckError::validation_field(
                    format!("Unknown class selection '{other}', expected all, none or a class id"),
                    "turma",
                )
            }),
        }
    }
}

impl fmt::Display for ClassSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SELECTION),
            Self::None => f.write_str(NO_CLASS_SELECTION),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Everything the dashboard filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSelection {
    /// Time bucket of the chart.
    pub period: AggregationPeriod,
    /// Class selector.
    pub class: ClassSelection,
    /// Event type, `None` for both.
    pub event_type: Option<EventType>,
}

/// Result of loading the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// Points to chart, in period order.
    Ready(Vec<GroupedPoint>),
    /// The selection matched no records.
    Empty,
    /// Loading failed; the message is meant for the user and loading may be retried.
    Failed(String),
}

impl DashboardState {
    /// Points to chart; empty unless [`Ready`](Self::Ready).
    pub fn points(&self) -> &[GroupedPoint] {
        match self {
            Self::Ready(points) => points,
            Self::Empty | Self::Failed(_) => &[],
        }
    }
}

/// Loads dashboard data for a selection.
pub struct DashboardFlow<B> {
    backend: B,
    classes: Vec<ClassGroup>,
}

impl<B: Backend> DashboardFlow<B> {
    /// Flow with an empty class list; call [`refresh_classes`](Self::refresh_classes) to fill it.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            classes: Vec::new(),
        }
    }

    /// The backend in use.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Classes known to the selector.
    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    /// Reload the class list. On failure the previous list is kept.
    #[instrument(skip(self))]
    pub async fn refresh_classes(&mut self) -> &[ClassGroup] {
        match self.backend.classes().await {
            Ok(classes) => self.classes = classes,
            Err(e) => warn!("Failed to load classes: {}", e),
        }
        &self.classes
    }

    /// Name of the selected class, or `None` when the selection does not
    /// restrict by class. Unknown ids and unnamed classes do not restrict either.
    pub fn resolve_class(&self, selection: ClassSelection) -> Option<&str> {
        match selection {
            ClassSelection::All | ClassSelection::None => None,
            ClassSelection::Id(id) => self
                .classes
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.as_str())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Fetch records and aggregate them for `selection`.
    #[instrument(skip(self), fields(period = %selection.period, class = %selection.class))]
    pub async fn load(&self, selection: &DashboardSelection) -> DashboardState {
        let records = match self.backend.dashboard_records().await {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to load dashboard data: {}", e);
                return DashboardState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        };

        let class_name = self.resolve_class(selection.class);
        if let (ClassSelection::Id(id), None) = (selection.class, class_name) {
            if self.classes.iter().all(|c| c.id != id) {
                warn!("Class {} is not in the class list, showing all classes", id);
            }
        }

        let filter = RecordFilter {
            class_name: class_name.map(str::to_string),
            event_type: selection.event_type,
        };
        let outcome = TimeSeriesAggregator::new(selection.period)
            .with_filter(filter)
            .aggregate_with_stats(&records);

        info!(
            "Dashboard ready: {} points from {} records",
            outcome.points.len(),
            outcome.stats.counted()
        );

        if outcome.points.is_empty() {
            DashboardState::Empty
        } else {
            DashboardState::Ready(outcome.points)
        }
    }

    /// End the teacher's session.
    pub async fn logout(&self) -> Result<()> {
        self.backend.logout().await
    }
}
