//! Live dashboard aggregation over store snapshots.
//!
//! Each aggregation is a combine-latest worker over the store snapshot: it
//! recomputes the view state whenever a write is published or the selection
//! changes. Employees, tasks and attendance (or activities) always come from
//! the same committed write.

use crate::dashboard::metrics::{employee_dashboard, overview};
use crate::dashboard::{DashboardState, OverviewFilter, OverviewState};
use crate::live::{spawn_combine_latest, LiveJoin};
use crate::model::employee::EmployeeId;
use crate::store::{Store, StoreSnapshot};
use log::debug;

/// Live single-employee dashboard; the selection is the target employee id.
pub type EmployeeDashboardFeed = LiveJoin<Option<EmployeeId>, DashboardState>;

/// Live fleet overview; the selection is the overview filter.
pub type OverviewFeed = LiveJoin<OverviewFilter, OverviewState>;

/// Starts the single-employee dashboard aggregation.
///
/// `None` selects the first employee in roster order. Must be called from
/// within a tokio runtime; dropping the feed stops the worker.
pub fn spawn_employee_dashboard(store: &Store, selected: Option<EmployeeId>) -> EmployeeDashboardFeed {
    spawn_combine_latest(
        "employee_dashboard",
        store.subscribe(),
        selected,
        DashboardState::Loading,
        |selected: &Option<EmployeeId>, snapshot: &StoreSnapshot| {
            let state = employee_dashboard(
                *selected,
                &snapshot.employees,
                &snapshot.tasks,
                &snapshot.attendance,
            );
            debug!(
                "event=dashboard_recompute module=dashboard kind=employee employees={} tasks={} attendance={} resolved={}",
                snapshot.employees.len(),
                snapshot.tasks.len(),
                snapshot.attendance.len(),
                state.dashboard().map_or(0, |dashboard| dashboard.employee.id)
            );
            state
        },
    )
}

/// Starts the fleet overview aggregation.
pub fn spawn_overview(store: &Store, filter: OverviewFilter) -> OverviewFeed {
    spawn_combine_latest(
        "overview",
        store.subscribe(),
        filter,
        OverviewState::Loading,
        |filter: &OverviewFilter, snapshot: &StoreSnapshot| {
            debug!(
                "event=dashboard_recompute module=dashboard kind=overview employees={} tasks={} activities={}",
                snapshot.employees.len(),
                snapshot.tasks.len(),
                snapshot.activities.len()
            );
            OverviewState::Ready(Box::new(overview(
                filter,
                &snapshot.employees,
                &snapshot.tasks,
                &snapshot.activities,
            )))
        },
    )
}
