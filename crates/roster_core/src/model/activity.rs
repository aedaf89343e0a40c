//! Activity feed entries.
//!
//! Activity rows are immutable and reference employees/tasks by id only.
//! A referenced row may no longer exist.

use crate::model::day::now_epoch_ms;
use crate::model::employee::EmployeeId;
use crate::model::task::TaskId;
use crate::model::RowId;
use serde::{Deserialize, Serialize};

/// Activity identity.
pub type ActivityId = RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    EmployeeAdded,
    EmployeeUpdated,
    TaskCreated,
    TaskCompleted,
    AttendanceMarked,
    PerformanceUpdated,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmployeeAdded => "EMPLOYEE_ADDED",
            Self::EmployeeUpdated => "EMPLOYEE_UPDATED",
            Self::TaskCreated => "TASK_CREATED",
            Self::TaskCompleted => "TASK_COMPLETED",
            Self::AttendanceMarked => "ATTENDANCE_MARKED",
            Self::PerformanceUpdated => "PERFORMANCE_UPDATED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EMPLOYEE_ADDED" => Some(Self::EmployeeAdded),
            "EMPLOYEE_UPDATED" => Some(Self::EmployeeUpdated),
            "TASK_CREATED" => Some(Self::TaskCreated),
            "TASK_COMPLETED" => Some(Self::TaskCompleted),
            "ATTENDANCE_MARKED" => Some(Self::AttendanceMarked),
            "PERFORMANCE_UPDATED" => Some(Self::PerformanceUpdated),
            _ => None,
        }
    }
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Zero until the row has been inserted.
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Creation instant in epoch milliseconds.
    pub created_at: i64,
    pub related_employee_id: Option<EmployeeId>,
    pub related_task_id: Option<TaskId>,
}

impl Activity {
    /// Creates an unsaved activity stamped with the current instant.
    pub fn new(kind: ActivityKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            kind,
            created_at: now_epoch_ms(),
            related_employee_id: None,
            related_task_id: None,
        }
    }

    pub fn for_employee(mut self, employee_id: EmployeeId) -> Self {
        self.related_employee_id = Some(employee_id);
        self
    }

    pub fn for_task(mut self, task_id: TaskId) -> Self {
        self.related_task_id = Some(task_id);
        self
    }

    pub fn at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }
}
