//! Dashboard view state: pure metrics plus live aggregation workers.
//!
//! # Responsibility
//! - Join employees, tasks and attendance into per-employee snapshots.
//! - Reduce the whole roster into fleet-wide overview figures.
//!
//! # Invariants
//! - Every ratio over an empty collection is `0.0`, never NaN.
//! - Snapshots are immutable values; a change produces a new snapshot.

pub mod aggregator;
pub mod metrics;

use crate::model::activity::Activity;
use crate::model::attendance::{AttendanceId, AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::task::Task;
use serde::Serialize;

pub const DEFAULT_TOP_PERFORMERS: usize = 5;
pub const DEFAULT_OVERVIEW_ACTIVITIES: usize = 5;
pub const PERFORMANCE_RECENT_TASKS: usize = 7;

/// Attendance tallies for one employee or the whole roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceCounts {
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
}

impl AttendanceCounts {
    pub fn total(&self) -> usize {
        self.present + self.absent + self.leave
    }

    pub(crate) fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Leave => self.leave += 1,
        }
    }
}

/// Snapshot for the single-employee dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDashboard {
    pub employee: Employee,
    pub tasks: Vec<Task>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// `completed_tasks / total_tasks`, `0.0` without tasks.
    pub completion_rate: f64,
    pub attendance: Vec<AttendanceRecord>,
    pub attendance_counts: AttendanceCounts,
    /// `present / total`, `0.0` without records.
    pub attendance_rate: f64,
}

/// Output of the single-employee aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "dashboard", rename_all = "snake_case")]
pub enum DashboardState {
    /// Aggregation has not produced its first snapshot yet.
    Loading,
    /// The roster is empty.
    NoEmployee,
    Ready(Box<EmployeeDashboard>),
}

impl DashboardState {
    pub fn dashboard(&self) -> Option<&EmployeeDashboard> {
        match self {
            Self::Ready(dashboard) => Some(dashboard),
            Self::Loading | Self::NoEmployee => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Parameters of the multi-employee overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewFilter {
    /// Case-insensitive search over employee names and task titles.
    pub query: String,
    pub top_performers: usize,
    pub recent_activities: usize,
}

impl Default for OverviewFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            top_performers: DEFAULT_TOP_PERFORMERS,
            recent_activities: DEFAULT_OVERVIEW_ACTIVITIES,
        }
    }
}

/// Fleet-wide overview snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub employee_count: usize,
    /// Mean of `Employee::performance`, `0.0` for an empty roster.
    pub average_performance: f64,
    pub completed_tasks: usize,
    /// Mean of `Employee::rating`, `0.0` for an empty roster.
    pub average_rating: f64,
    /// Highest performance first, truncated to the filter's count.
    pub top_performers: Vec<Employee>,
    /// Newest first, truncated to the filter's count.
    pub recent_activities: Vec<Activity>,
    /// Employees whose name matches the search query; all when blank.
    pub matching_employees: Vec<Employee>,
    /// Tasks whose title matches the search query; all when blank.
    pub matching_tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "overview", rename_all = "snake_case")]
pub enum OverviewState {
    Loading,
    Ready(Box<Overview>),
}

impl OverviewState {
    pub fn overview(&self) -> Option<&Overview> {
        match self {
            Self::Ready(overview) => Some(overview),
            Self::Loading => None,
        }
    }
}

/// Fleet task/attendance summary for the performance screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub completion_rate: f64,
    pub attendance_rate: f64,
    /// Completion flags of the most recently assigned tasks, oldest first.
    pub recent_completion: Vec<bool>,
}

/// One row of the daily attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub day: i64,
    pub status: AttendanceStatus,
    /// `None` when nothing has been marked yet for this employee and day.
    pub record_id: Option<AttendanceId>,
}
