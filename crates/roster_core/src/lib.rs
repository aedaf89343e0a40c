//! Core domain logic for the employee roster.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod live;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use auth::password::{PasswordError, PasswordService};
pub use auth::{AuthError, AuthOutcome, AuthProvider, LoginFlow, LoginState};
pub use config::CoreConfig;
pub use dashboard::aggregator::{spawn_employee_dashboard, spawn_overview};
pub use dashboard::{
    DashboardState, EmployeeDashboard, Overview, OverviewFilter, OverviewState,
    PerformanceSummary, RosterEntry,
};
pub use live::{LiveQuery, Rows};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::activity::{Activity, ActivityId, ActivityKind};
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::day::{normalize_day, same_day, today};
pub use model::employee::{Employee, EmployeeId};
pub use model::task::{Task, TaskId};
pub use model::ValidationError;
pub use repo::{RepoError, RepoResult};
pub use service::activity_service::ActivityService;
pub use service::attendance_service::{AttendanceService, MarkedAttendance};
pub use service::employee_service::EmployeeService;
pub use service::profile_service::{Profile, ProfileService};
pub use service::task_service::{NewTask, TaskService};
pub use service::{ServiceError, ServiceResult};
pub use store::{Store, StoreSnapshot, Table};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
