//! Backend wire types and domain enums shared across the workspace.

use crate::error::VibeCheckError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selection value meaning "no restriction" in dashboard filters.
pub const ALL_SELECTION: &str = "all";

/// Identifier of a class (`turma`) on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClassId {
    type Err = VibeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| VibeCheckError::validation_field(format!("Invalid class id '{s}'"), "turma"))
    }
}

/// Whether an event was recorded at the start or the end of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// Recorded when the class starts.
    Checkin,
    /// Recorded when the class ends.
    Checkout,
}

impl EventType {
    /// Backend spelling of the event type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkin => "CHECKIN",
            Self::Checkout => "CHECKOUT",
        }
    }

    /// Path segment used by the code release endpoints.
    pub const fn release_path(self) -> &'static str {
        match self {
            Self::Checkin => "liberar-checkin",
            Self::Checkout => "liberar-checkout",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = VibeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHECKIN" => Ok(Self::Checkin),
            "CHECKOUT" => Ok(Self::Checkout),
            other => Err(VibeCheckError::validation_field(
                format!("Unknown event type '{other}'"),
                "tipo",
            )),
        }
    }
}

/// Granularity of the dashboard time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationPeriod {
    /// One point per calendar day, labelled `dd/MM`.
    Day,
    /// One point per week of the year, labelled `Semana {n}`.
    Week,
    /// One point per month, labelled `MM/yyyy`.
    Month,
    /// Whole history; grouped by week like [`AggregationPeriod::Week`].
    #[default]
    All,
}

impl AggregationPeriod {
    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }
}

impl fmt::Display for AggregationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationPeriod {
    type Err = VibeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(VibeCheckError::validation_field(
                format!("Unknown period '{other}', expected day, week, month or all"),
                "period",
            )),
        }
    }
}

/// The nine emotions a student can pick, in emoji grid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Emotion {
    /// Code 1.
    VeryHappy,
    /// Code 2.
    Happy,
    /// Code 3.
    Unmotivated,
    /// Code 4.
    Indifferent,
    /// Code 5.
    Surprised,
    /// Code 6.
    Sad,
    /// Code 7.
    Irritated,
    /// Code 8.
    Anxious,
    /// Code 9.
    InLove,
}

impl Emotion {
    /// Every emotion, ordered by code.
    pub const ALL: [Self; 9] = [
        Self::VeryHappy,
        Self::Happy,
        Self::Unmotivated,
        Self::Indifferent,
        Self::Surprised,
        Self::Sad,
        Self::Irritated,
        Self::Anxious,
        Self::InLove,
    ];

    /// Look up an emotion by its backend code. Codes outside `1..=9` have no emotion.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Look up an emotion by its display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }

    /// Backend code of this emotion.
    pub const fn code(self) -> u8 {
        match self {
            Self::VeryHappy => 1,
            Self::Happy => 2,
            Self::Unmotivated => 3,
            Self::Indifferent => 4,
            Self::Surprised => 5,
            Self::Sad => 6,
            Self::Irritated => 7,
            Self::Anxious => 8,
            Self::InLove => 9,
        }
    }

    /// Label shown on charts, reports and the emoji grid.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHappy => "Muito Feliz",
            Self::Happy => "Feliz",
            Self::Unmotivated => "Desmotivado",
            Self::Indifferent => "Indiferente",
            Self::Surprised => "Surpreso",
            Self::Sad => "Triste",
            Self::Irritated => "Irritado",
            Self::Anxious => "Ansioso",
            Self::InLove => "Apaixonado",
        }
    }

    /// Chart series color as a `#rrggbb` string.
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryHappy => "#4ade80",
            Self::Happy => "#86efac",
            Self::Unmotivated => "#a3a3a3",
            Self::Indifferent => "#d4d4d4",
            Self::Surprised => "#fbbf24",
            Self::Sad => "#60a5fa",
            Self::Irritated => "#f87171",
            Self::Anxious => "#c084fc",
            Self::InLove => "#f472b6",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emotion {
    type Err = VibeCheckError;

    /// Accepts either the numeric code or the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .ok()
            .and_then(Self::from_code)
            .or_else(|| Self::from_label(trimmed))
            .ok_or_else(|| {
                VibeCheckError::validation_field(format!("Unknown emotion '{trimmed}'"), "emocao")
            })
    }
}

/// One check-in/check-out answer as returned by `/api/codigo/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Local timestamp, `dd/MM/yyyy HH:mm`.
    #[serde(rename = "data")]
    pub timestamp: String,
    /// Raw emotion code; unknown codes are kept here and dropped during aggregation.
    #[serde(rename = "emocao")]
    pub emotion_code: i64,
    /// Class name as stored by the backend.
    #[serde(rename = "turma")]
    pub class_name: String,
    /// Check-in or check-out.
    #[serde(rename = "tipo")]
    pub event_type: EventType,
}

impl EventRecord {
    /// Build a record from its parts.
    pub fn new(
        timestamp: impl Into<String>,
        emotion_code: i64,
        class_name: impl Into<String>,
        event_type: EventType,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            emotion_code,
            class_name: class_name.into(),
            event_type,
        }
    }

    /// The emotion of this record, if its code is known.
    pub fn emotion(&self) -> Option<Emotion> {
        Emotion::from_code(self.emotion_code)
    }
}

/// A class (`turma`) as listed by `/api/codigo/turmas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Backend identifier.
    pub id: ClassId,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

impl ClassGroup {
    /// Build a class entry.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ClassId(id),
            name: name.into(),
        }
    }

    /// Rows the backend returns as scaffolding: id `0` or the literal name `"string"`.
    pub fn is_placeholder(&self) -> bool {
        self.id.0 == 0 || self.name.eq_ignore_ascii_case("string")
    }
}

/// Response of the code release endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    /// Code students type on the check page.
    #[serde(rename = "codigo")]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_code_table() {
        assert_eq!(Emotion::from_code(1), Some(Emotion::VeryHappy));
        assert_eq!(Emotion::from_code(9), Some(Emotion::InLove));
        assert_eq!(Emotion::from_code(0), None);
        assert_eq!(Emotion::from_code(10), None);
        assert_eq!(Emotion::from_code(-3), None);

        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_code(i64::from(emotion.code())), Some(emotion));
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
    }

    #[test]
    fn test_emotion_from_str() {
        assert_eq!("3".parse::<Emotion>().unwrap(), Emotion::Unmotivated);
        assert_eq!("Triste".parse::<Emotion>().unwrap(), Emotion::Sad);
        assert!("12".parse::<Emotion>().is_err());
        assert!("Contente".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_event_record_wire_format() {
        let json = r#"{"data":"01/06/2024 10:00","emocao":1,"turma":"A","tipo":"CHECKIN"}"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.timestamp, "01/06/2024 10:00");
        assert_eq!(record.emotion(), Some(Emotion::VeryHappy));
        assert_eq!(record.class_name, "A");
        assert_eq!(record.event_type, EventType::Checkin);
    }

    #[test]
    fn test_class_group_placeholders() {
        assert!(ClassGroup::new(0, "9A").is_placeholder());
        assert!(ClassGroup::new(4, "String").is_placeholder());
        assert!(!ClassGroup::new(4, "9A").is_placeholder());

        let group: ClassGroup = serde_json::from_str(r#"{"id":7,"nome":"Turma B"}"#).unwrap();
        assert_eq!(group, ClassGroup::new(7, "Turma B"));
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("Month".parse::<AggregationPeriod>().unwrap(), AggregationPeriod::Month);
        assert_eq!(AggregationPeriod::default(), AggregationPeriod::All);
        assert!("year".parse::<AggregationPeriod>().is_err());
    }

    #[test]
    fn test_event_type_parsing() {
        assert_eq!("checkout".parse::<EventType>().unwrap(), EventType::Checkout);
        assert_eq!(EventType::Checkin.release_path(), "liberar-checkin");
        assert!("all".parse::<EventType>().is_err());
    }
}
