//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core errors into response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One store per process, opened lazily at the configured path.
//! - DB-backed calls are not `sync`, so FRB runs them off the UI thread.

use log::error;
use once_cell::sync::OnceCell;
use roster_core::dashboard::metrics::{employee_dashboard, overview, performance_summary};
use roster_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    init_logging_from_config, logging_status as logging_status_inner, ping as ping_inner,
    Activity, ActivityService, AttendanceService, AttendanceStatus, CoreConfig, DashboardState,
    Employee, EmployeeService, NewTask, OverviewFilter, PasswordService, ProfileService,
    RosterEntry, Store, Task, TaskService,
};
use std::sync::Arc;

static CONFIG: OnceCell<CoreConfig> = OnceCell::new();
static STORE: OnceCell<Arc<Store>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Initializes logging from `ROSTER_LOG_LEVEL` and `ROSTER_LOG_DIR`.
///
/// # FFI contract
/// - Sync call; reads the same process config as the store.
/// - Returns empty string on success and error message on failure,
///   including when no log directory is configured.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    match init_logging_from_config(config()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Active logging setup, `None` before logging is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    pub level: String,
    pub log_dir: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn logging_status() -> Option<LoggingStatus> {
    logging_status_inner().map(|(level, dir)| LoggingStatus {
        level: level.to_string(),
        log_dir: dir.display().to_string(),
    })
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected row, when there is one.
    pub id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub department: String,
    pub phone_number: String,
    /// Fraction in `0.0..=1.0`.
    pub performance: f64,
    pub rating: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub employee_id: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterItem {
    pub employee_id: i64,
    pub employee_name: String,
    pub day_epoch_ms: i64,
    /// `PRESENT|ABSENT|LEAVE`.
    pub status: String,
    pub record_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub created_at: i64,
    pub related_employee_id: Option<i64>,
    pub related_task_id: Option<i64>,
}

/// Single-employee dashboard envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDashboardResponse {
    pub ok: bool,
    pub message: String,
    /// `None` when the roster is empty.
    pub employee: Option<EmployeeItem>,
    pub tasks: Vec<TaskItem>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: f64,
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
    pub attendance_rate: f64,
}

impl EmployeeDashboardResponse {
    fn empty(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
            employee: None,
            tasks: Vec::new(),
            total_tasks: 0,
            completed_tasks: 0,
            completion_rate: 0.0,
            present: 0,
            absent: 0,
            leave: 0,
            attendance_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewResponse {
    pub ok: bool,
    pub message: String,
    pub employee_count: u32,
    pub average_performance: f64,
    pub completed_tasks: u32,
    pub average_rating: f64,
    pub top_performers: Vec<EmployeeItem>,
    pub recent_activities: Vec<ActivityItem>,
    pub matching_employees: Vec<EmployeeItem>,
    pub matching_tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummaryResponse {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
    pub completion_rate: f64,
    pub attendance_rate: f64,
    pub recent_completion: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub ok: bool,
    pub message: String,
    pub user_name: String,
    pub photo_uri: Option<String>,
}

/// Adds an employee to the roster.
pub fn employee_add(
    name: String,
    email: String,
    designation: String,
    department: String,
    phone_number: String,
) -> ActionResponse {
    let employee = Employee::new(name.trim())
        .with_email(email.trim())
        .with_designation(designation.trim())
        .with_department(department.trim())
        .with_phone_number(phone_number.trim());
    match with_store(|store| EmployeeService::new(store).add_employee(&employee).map_err(fail)) {
        Ok(saved) => ActionResponse::success("Employee added.", Some(saved.id)),
        Err(err) => ActionResponse::failure(format!("employee_add failed: {err}")),
    }
}

/// Replaces the editable profile fields of an employee.
///
/// Performance and rating keep their stored values.
pub fn employee_update(
    id: i64,
    name: String,
    email: String,
    designation: String,
    department: String,
    phone_number: String,
) -> ActionResponse {
    let result = with_store(|store| {
        let service = EmployeeService::new(store);
        let current = service
            .get_employee(id)
            .map_err(fail)?
            .ok_or_else(|| format!("employee not found: {id}"))?;
        let updated = Employee {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            designation: designation.trim().to_string(),
            department: department.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
            ..current
        };
        service.update_employee(&updated).map_err(fail)
    });
    match result {
        Ok(()) => ActionResponse::success("Employee updated.", Some(id)),
        Err(err) => ActionResponse::failure(format!("employee_update failed: {err}")),
    }
}

/// Lists the roster ordered by name; empty on storage failure.
pub fn employee_list() -> Vec<EmployeeItem> {
    match with_store(|store| Ok(store.employees())) {
        Ok(rows) => rows.iter().map(to_employee_item).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn employee_update_performance(id: i64, performance: f64) -> ActionResponse {
    match with_store(|store| {
        EmployeeService::new(store)
            .update_performance(id, performance)
            .map_err(fail)
    }) {
        Ok(()) => ActionResponse::success("Performance updated.", Some(id)),
        Err(err) => ActionResponse::failure(format!("employee_update_performance failed: {err}")),
    }
}

pub fn employee_update_rating(id: i64, rating: i64) -> ActionResponse {
    match with_store(|store| EmployeeService::new(store).update_rating(id, rating).map_err(fail)) {
        Ok(()) => ActionResponse::success("Rating updated.", Some(id)),
        Err(err) => ActionResponse::failure(format!("employee_update_rating failed: {err}")),
    }
}

/// Deletes an employee together with their tasks and attendance.
pub fn employee_delete(id: i64) -> ActionResponse {
    match with_store(|store| EmployeeService::new(store).delete_employee(id).map_err(fail)) {
        Ok(()) => ActionResponse::success("Employee deleted.", Some(id)),
        Err(err) => ActionResponse::failure(format!("employee_delete failed: {err}")),
    }
}

/// Assigns a new task; `employee_id=None` reports "no employee selected".
pub fn task_add(title: String, description: String, employee_id: Option<i64>) -> ActionResponse {
    let request = NewTask {
        title,
        description,
        employee_id,
    };
    match with_store(|store| TaskService::new(store).add_task(&request).map_err(fail)) {
        Ok(task) => ActionResponse::success("Task assigned.", Some(task.id)),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

pub fn task_set_completed(task_id: i64, completed: bool) -> ActionResponse {
    let result = with_store(|store| {
        let service = TaskService::new(store);
        let task = service
            .get_task(task_id)
            .map_err(fail)?
            .ok_or_else(|| format!("task not found: {task_id}"))?;
        service.update_task_status(&task, completed).map_err(fail)
    });
    match result {
        Ok(_) => ActionResponse::success("Task updated.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_set_completed failed: {err}")),
    }
}

pub fn task_delete(task_id: i64) -> ActionResponse {
    let result = with_store(|store| {
        let service = TaskService::new(store);
        let task = service
            .get_task(task_id)
            .map_err(fail)?
            .ok_or_else(|| format!("task not found: {task_id}"))?;
        service.delete_task(&task).map_err(fail)
    });
    match result {
        Ok(()) => ActionResponse::success("Task deleted.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Lists tasks, optionally for one employee only.
pub fn task_list(employee_id: Option<i64>) -> Vec<TaskItem> {
    match with_store(|store| Ok(store.tasks())) {
        Ok(rows) => rows
            .iter()
            .filter(|task| employee_id.map_or(true, |id| task.employee_id == id))
            .map(to_task_item)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Marks attendance; `status` is `PRESENT|ABSENT|LEAVE` in any case.
pub fn attendance_mark(employee_id: i64, day_epoch_ms: i64, status: String) -> ActionResponse {
    let Some(status) = AttendanceStatus::parse(&status) else {
        return ActionResponse::failure(format!(
            "attendance_mark failed: unknown status `{}`",
            status.trim()
        ));
    };
    match with_store(|store| {
        AttendanceService::new(store)
            .mark_attendance(employee_id, day_epoch_ms, status)
            .map_err(fail)
    }) {
        Ok(marked) => ActionResponse::success("Attendance marked.", Some(marked.record.id)),
        Err(err) => ActionResponse::failure(format!("attendance_mark failed: {err}")),
    }
}

/// One entry per employee for the given day; unmarked employees read ABSENT.
pub fn attendance_roster(day_epoch_ms: i64) -> Vec<RosterItem> {
    match with_store(|store| Ok(AttendanceService::new(store).roster_for_day(day_epoch_ms))) {
        Ok(entries) => entries.iter().map(to_roster_item).collect(),
        Err(_) => Vec::new(),
    }
}

/// Newest activities; `None` or `0` uses the configured default.
pub fn activity_recent(limit: Option<u32>) -> Vec<ActivityItem> {
    let limit = match limit {
        Some(0) | None => config().recent_activity,
        Some(value) => value,
    };
    match with_store(|store| Ok(store.activities())) {
        Ok(rows) => rows
            .iter()
            .take(limit as usize)
            .map(to_activity_item)
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn activity_delete(id: i64) -> ActionResponse {
    match with_store(|store| ActivityService::new(store).delete(id).map_err(fail)) {
        Ok(()) => ActionResponse::success("Activity deleted.", Some(id)),
        Err(err) => ActionResponse::failure(format!("activity_delete failed: {err}")),
    }
}

pub fn activity_clear() -> ActionResponse {
    match with_store(|store| ActivityService::new(store).clear().map_err(fail)) {
        Ok(removed) => ActionResponse::success(format!("Cleared {removed} activities."), None),
        Err(err) => ActionResponse::failure(format!("activity_clear failed: {err}")),
    }
}

/// Dashboard snapshot for `employee_id`, or the first employee when `None`
/// or unknown.
pub fn dashboard_employee(employee_id: Option<i64>) -> EmployeeDashboardResponse {
    let state = with_store(|store| {
        Ok(employee_dashboard(
            employee_id,
            &store.employees(),
            &store.tasks(),
            &store.attendance(),
        ))
    });
    match state {
        Ok(DashboardState::Ready(dashboard)) => EmployeeDashboardResponse {
            ok: true,
            message: String::new(),
            employee: Some(to_employee_item(&dashboard.employee)),
            tasks: dashboard.tasks.iter().map(to_task_item).collect(),
            total_tasks: count(dashboard.total_tasks),
            completed_tasks: count(dashboard.completed_tasks),
            completion_rate: dashboard.completion_rate,
            present: count(dashboard.attendance_counts.present),
            absent: count(dashboard.attendance_counts.absent),
            leave: count(dashboard.attendance_counts.leave),
            attendance_rate: dashboard.attendance_rate,
        },
        Ok(DashboardState::NoEmployee | DashboardState::Loading) => {
            EmployeeDashboardResponse::empty(true, "No employees yet.")
        }
        Err(err) => {
            EmployeeDashboardResponse::empty(false, format!("dashboard_employee failed: {err}"))
        }
    }
}

/// Fleet overview with optional search text and list sizes.
pub fn dashboard_overview(
    query: String,
    top_performers: Option<u32>,
    recent_activities: Option<u32>,
) -> OverviewResponse {
    let filter = OverviewFilter {
        query,
        top_performers: top_performers.map_or(config().top_performers, |value| value as usize),
        recent_activities: recent_activities
            .map_or(config().recent_activity as usize, |value| value as usize),
    };
    let result = with_store(|store| {
        Ok(overview(
            &filter,
            &store.employees(),
            &store.tasks(),
            &store.activities(),
        ))
    });
    match result {
        Ok(view) => OverviewResponse {
            ok: true,
            message: String::new(),
            employee_count: count(view.employee_count),
            average_performance: view.average_performance,
            completed_tasks: count(view.completed_tasks),
            average_rating: view.average_rating,
            top_performers: view.top_performers.iter().map(to_employee_item).collect(),
            recent_activities: view.recent_activities.iter().map(to_activity_item).collect(),
            matching_employees: view.matching_employees.iter().map(to_employee_item).collect(),
            matching_tasks: view.matching_tasks.iter().map(to_task_item).collect(),
        },
        Err(err) => OverviewResponse {
            ok: false,
            message: format!("dashboard_overview failed: {err}"),
            employee_count: 0,
            average_performance: 0.0,
            completed_tasks: 0,
            average_rating: 0.0,
            top_performers: Vec::new(),
            recent_activities: Vec::new(),
            matching_employees: Vec::new(),
            matching_tasks: Vec::new(),
        },
    }
}

/// Fleet-wide task completion and attendance figures.
pub fn dashboard_performance() -> PerformanceSummaryResponse {
    let summary = with_store(|store| Ok(performance_summary(&store.tasks(), &store.attendance())))
        .unwrap_or_else(|_| performance_summary(&[], &[]));
    PerformanceSummaryResponse {
        total_tasks: count(summary.total_tasks),
        completed_tasks: count(summary.completed_tasks),
        pending_tasks: count(summary.pending_tasks),
        completion_rate: summary.completion_rate,
        attendance_rate: summary.attendance_rate,
        recent_completion: summary.recent_completion,
    }
}

/// Changes the local app password.
///
/// Failure messages are UI-ready ("Incorrect current password.",
/// "New passwords do not match.").
pub fn password_update(current: String, new: String, confirm: String) -> ActionResponse {
    match with_store(|store| {
        PasswordService::new(store)
            .update_password(&current, &new, &confirm)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Password updated.", None),
        Err(err) => ActionResponse::failure(err),
    }
}

/// Clears stored credentials.
pub fn logout() -> ActionResponse {
    match with_store(|store| PasswordService::new(store).logout().map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Logged out.", None),
        Err(err) => ActionResponse::failure(format!("logout failed: {err}")),
    }
}

pub fn profile_get() -> ProfileResponse {
    match with_store(|store| ProfileService::new(store).profile().map_err(fail)) {
        Ok(profile) => ProfileResponse {
            ok: true,
            message: String::new(),
            user_name: profile.user_name,
            photo_uri: profile.photo_uri,
        },
        Err(err) => ProfileResponse {
            ok: false,
            message: format!("profile_get failed: {err}"),
            user_name: String::new(),
            photo_uri: None,
        },
    }
}

/// Stores the display name and photo; blank or `None` values reset them.
pub fn profile_set(user_name: String, photo_uri: Option<String>) -> ActionResponse {
    let result = with_store(|store| {
        let service = ProfileService::new(store);
        service.set_user_name(&user_name).map_err(fail)?;
        service.set_photo_uri(photo_uri.as_deref()).map_err(fail)
    });
    match result {
        Ok(()) => ActionResponse::success("Profile updated.", None),
        Err(err) => ActionResponse::failure(format!("profile_set failed: {err}")),
    }
}

fn config() -> &'static CoreConfig {
    CONFIG.get_or_init(CoreConfig::from_env)
}

fn store() -> Result<Arc<Store>, String> {
    STORE
        .get_or_try_init(|| {
            let path = &config().db_path;
            Store::open(path).map(Arc::new).map_err(|err| {
                error!(
                    "event=ffi_store_open module=ffi status=error error_code={}",
                    err.code()
                );
                format!("store open failed: {err}")
            })
        })
        .map(Arc::clone)
}

fn with_store<T>(f: impl FnOnce(Arc<Store>) -> Result<T, String>) -> Result<T, String> {
    f(store()?)
}

fn fail(err: roster_core::ServiceError) -> String {
    err.to_string()
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_employee_item(employee: &Employee) -> EmployeeItem {
    EmployeeItem {
        id: employee.id,
        name: employee.name.clone(),
        email: employee.email.clone(),
        designation: employee.designation.clone(),
        department: employee.department.clone(),
        phone_number: employee.phone_number.clone(),
        performance: employee.performance,
        rating: employee.rating,
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        employee_id: task.employee_id,
        completed: task.completed,
    }
}

fn to_roster_item(entry: &RosterEntry) -> RosterItem {
    RosterItem {
        employee_id: entry.employee_id,
        employee_name: entry.employee_name.clone(),
        day_epoch_ms: entry.day,
        status: entry.status.as_str().to_string(),
        record_id: entry.record_id,
    }
}

fn to_activity_item(activity: &Activity) -> ActivityItem {
    ActivityItem {
        id: activity.id,
        title: activity.title.clone(),
        description: activity.description.clone(),
        kind: activity.kind.as_str().to_string(),
        created_at: activity.created_at,
        related_employee_id: activity.related_employee_id,
        related_task_id: activity.related_task_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_from_env_follows_process_config() {
        let result = init_logging_from_env();
        if config().log_dir.is_none() {
            assert_eq!(result, "no log directory configured");
        } else if result.is_empty() {
            assert!(logging_status().is_some());
        }
    }

    #[test]
    fn employee_task_and_attendance_flow() {
        let name = unique_token("ffi-employee");
        let added = employee_add(
            name.clone(),
            String::new(),
            "Engineer".to_string(),
            String::new(),
            String::new(),
        );
        assert!(added.ok, "{}", added.message);
        let employee_id = added.id.expect("employee_add should return id");
        assert!(employee_list().iter().any(|e| e.id == employee_id));

        let task = task_add("Audit".to_string(), String::new(), Some(employee_id));
        assert!(task.ok, "{}", task.message);
        let task_id = task.id.expect("task_add should return id");
        let done = task_set_completed(task_id, true);
        assert!(done.ok, "{}", done.message);

        let marked = attendance_mark(employee_id, 1_717_000_000_000, "present".to_string());
        assert!(marked.ok, "{}", marked.message);
        let record_id = marked.id.expect("attendance_mark should return record id");

        let dashboard = dashboard_employee(Some(employee_id));
        assert!(dashboard.ok, "{}", dashboard.message);
        assert_eq!(dashboard.employee.map(|e| e.id), Some(employee_id));
        assert_eq!(dashboard.total_tasks, 1);
        assert_eq!(dashboard.completed_tasks, 1);
        assert_eq!(dashboard.present, 1);
        assert_eq!(dashboard.attendance_rate, 1.0);

        let roster = attendance_roster(1_717_000_000_000);
        let entry = roster
            .iter()
            .find(|entry| entry.employee_id == employee_id)
            .expect("roster should list the employee");
        assert_eq!(entry.status, "PRESENT");
        assert_eq!(entry.record_id, Some(record_id));

        let remarked = attendance_mark(employee_id, 1_717_000_060_000, "leave".to_string());
        assert!(remarked.ok, "{}", remarked.message);
        assert_eq!(remarked.id, Some(record_id));

        let deleted = employee_delete(employee_id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(task_list(Some(employee_id)).is_empty());
    }

    #[test]
    fn task_without_employee_is_rejected() {
        let response = task_add("Orphan".to_string(), String::new(), None);
        assert!(!response.ok);
        assert!(response.message.contains("no employee selected"));
    }

    #[test]
    fn attendance_rejects_unknown_status() {
        let response = attendance_mark(1, 1_717_000_000_000, "late".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("late"));
    }

    #[test]
    fn overview_search_finds_added_employee() {
        let name = unique_token("ffi-overview");
        let added = employee_add(
            name.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert!(added.ok, "{}", added.message);

        let view = dashboard_overview(name.clone(), Some(1), Some(3));
        assert!(view.ok, "{}", view.message);
        assert_eq!(view.matching_employees.len(), 1);
        assert!(view.top_performers.len() <= 1);
        assert!(view.recent_activities.len() <= 3);

        let deleted = employee_delete(added.id.expect("employee id"));
        assert!(deleted.ok, "{}", deleted.message);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
