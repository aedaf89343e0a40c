//! Daily attendance records.
//!
//! # Invariants
//! - `day` is always a normalized day boundary.
//! - At most one record exists per `(employee_id, day)`; enforced by the
//!   repository upsert, not by a storage constraint.
//! - `employee_name` is captured at marking time and never re-synced.

use crate::model::day::normalize_day;
use crate::model::employee::EmployeeId;
use crate::model::RowId;
use serde::{Deserialize, Serialize};

/// Attendance record identity.
pub type AttendanceId = RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Leave];

    /// Stable storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
            Self::Leave => "LEAVE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRESENT" => Some(Self::Present),
            "ABSENT" => Some(Self::Absent),
            "LEAVE" => Some(Self::Leave),
            _ => None,
        }
    }
}

/// Attendance of one employee on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Zero until the row has been inserted.
    pub id: AttendanceId,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    /// Normalized day in epoch milliseconds.
    pub day: i64,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Creates an unsaved record; `day` is normalized on construction.
    pub fn new(
        employee_id: EmployeeId,
        employee_name: impl Into<String>,
        day: i64,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: 0,
            employee_id,
            employee_name: employee_name.into(),
            day: normalize_day(day),
            status,
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

#[cfg(test)]
mod tests {
    use super::AttendanceStatus;

    #[test]
    fn status_labels_parse_back() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::parse("late"), None);
    }

    #[test]
    fn status_serializes_with_storage_label() {
        let json = serde_json::to_string(&AttendanceStatus::Leave).unwrap();
        assert_eq!(json, "\"LEAVE\"");
    }
}
