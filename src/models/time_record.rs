//! Clock event model.
//!
//! A [`TimeRecord`] is a single punch captured by the time clock. The engine
//! only consumes them; ingestion, deduplication and device validation happen
//! upstream.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind of clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// Start of the working day.
    Entry,
    /// End of the working day.
    Exit,
    /// Start of the intra-day break.
    BreakStart,
    /// End of the intra-day break.
    BreakEnd,
}

/// A single, immutable clock event for one employee.
///
/// # Example
///
/// ```
/// use ponto_engine::models::{RecordType, TimeRecord};
/// use chrono::NaiveDateTime;
///
/// let record = TimeRecord {
///     id: "rec_001".to_string(),
///     record_type: RecordType::Entry,
///     timestamp: NaiveDateTime::parse_from_str("2026-03-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(record.date().to_string(), "2026-03-02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Unique identifier of the punch.
    pub id: String,
    /// The kind of event.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Wall-clock instant of the punch.
    pub timestamp: NaiveDateTime,
    /// The employee who punched.
    pub employee_id: String,
}

impl TimeRecord {
    /// Returns the calendar date the punch belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecordType::BreakStart).unwrap(),
            "\"BREAK_START\""
        );
        assert_eq!(serde_json::to_string(&RecordType::Entry).unwrap(), "\"ENTRY\"");
    }

    #[test]
    fn test_time_record_deserialization() {
        let json = r#"{
            "id": "rec_010",
            "type": "BREAK_END",
            "timestamp": "2026-03-02T13:00:00",
            "employee_id": "emp_001"
        }"#;

        let record: TimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_type, RecordType::BreakEnd);
        assert_eq!(record.employee_id, "emp_001");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }

    #[test]
    fn test_unknown_record_type_is_rejected() {
        let json = r#"{
            "id": "rec_011",
            "type": "LUNCH",
            "timestamp": "2026-03-02T12:00:00",
            "employee_id": "emp_001"
        }"#;

        assert!(serde_json::from_str::<TimeRecord>(json).is_err());
    }
}
