//! Pure dashboard computations over table snapshots.

use crate::dashboard::{
    AttendanceCounts, DashboardState, EmployeeDashboard, Overview, OverviewFilter,
    PerformanceSummary, RosterEntry, PERFORMANCE_RECENT_TASKS,
};
use crate::model::activity::Activity;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::day::normalize_day;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::task::Task;

/// Ratio with the zero-on-empty convention.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Resolves the dashboard target: explicit id, else first employee.
pub fn resolve_employee(selected: Option<EmployeeId>, employees: &[Employee]) -> Option<&Employee> {
    selected
        .and_then(|id| employees.iter().find(|employee| employee.id == id))
        .or_else(|| employees.first())
}

/// Builds the single-employee dashboard snapshot.
pub fn employee_dashboard(
    selected: Option<EmployeeId>,
    employees: &[Employee],
    tasks: &[Task],
    attendance: &[AttendanceRecord],
) -> DashboardState {
    let Some(employee) = resolve_employee(selected, employees) else {
        return DashboardState::NoEmployee;
    };

    let tasks: Vec<Task> = tasks
        .iter()
        .filter(|task| task.employee_id == employee.id)
        .cloned()
        .collect();
    let completed_tasks = tasks.iter().filter(|task| task.completed).count();

    let attendance: Vec<AttendanceRecord> = attendance
        .iter()
        .filter(|record| record.employee_id == employee.id)
        .cloned()
        .collect();
    let attendance_counts = count_statuses(&attendance);

    DashboardState::Ready(Box::new(EmployeeDashboard {
        employee: employee.clone(),
        total_tasks: tasks.len(),
        completed_tasks,
        completion_rate: rate(completed_tasks, tasks.len()),
        attendance_rate: rate(attendance_counts.present, attendance_counts.total()),
        tasks,
        attendance,
        attendance_counts,
    }))
}

pub fn count_statuses(records: &[AttendanceRecord]) -> AttendanceCounts {
    let mut counts = AttendanceCounts::default();
    for record in records {
        counts.add(record.status);
    }
    counts
}

/// Mean performance; `0.0` for an empty roster.
pub fn average_performance(employees: &[Employee]) -> f64 {
    if employees.is_empty() {
        return 0.0;
    }
    employees.iter().map(|employee| employee.performance).sum::<f64>() / employees.len() as f64
}

/// Mean rating; `0.0` for an empty roster.
pub fn average_rating(employees: &[Employee]) -> f64 {
    if employees.is_empty() {
        return 0.0;
    }
    employees.iter().map(|employee| employee.rating as f64).sum::<f64>() / employees.len() as f64
}

/// Employees by performance descending; ties keep roster order.
pub fn top_performers(employees: &[Employee], count: usize) -> Vec<Employee> {
    let mut ranked = employees.to_vec();
    ranked.sort_by(|left, right| right.performance.total_cmp(&left.performance));
    ranked.truncate(count);
    ranked
}

/// Builds the fleet overview snapshot.
pub fn overview(
    filter: &OverviewFilter,
    employees: &[Employee],
    tasks: &[Task],
    activities: &[Activity],
) -> Overview {
    let needle = filter.query.trim().to_lowercase();
    let matches = |text: &str| needle.is_empty() || text.to_lowercase().contains(&needle);

    Overview {
        employee_count: employees.len(),
        average_performance: average_performance(employees),
        completed_tasks: tasks.iter().filter(|task| task.completed).count(),
        average_rating: average_rating(employees),
        top_performers: top_performers(employees, filter.top_performers),
        recent_activities: activities
            .iter()
            .take(filter.recent_activities)
            .cloned()
            .collect(),
        matching_employees: employees
            .iter()
            .filter(|employee| matches(&employee.name))
            .cloned()
            .collect(),
        matching_tasks: tasks
            .iter()
            .filter(|task| matches(&task.title))
            .cloned()
            .collect(),
    }
}

/// Fleet task completion and attendance summary.
pub fn performance_summary(tasks: &[Task], attendance: &[AttendanceRecord]) -> PerformanceSummary {
    let completed_tasks = tasks.iter().filter(|task| task.completed).count();
    let present = attendance.iter().filter(|record| record.is_present()).count();
    let recent_start = tasks.len().saturating_sub(PERFORMANCE_RECENT_TASKS);

    PerformanceSummary {
        total_tasks: tasks.len(),
        completed_tasks,
        pending_tasks: tasks.len() - completed_tasks,
        completion_rate: rate(completed_tasks, tasks.len()),
        attendance_rate: rate(present, attendance.len()),
        recent_completion: tasks[recent_start..].iter().map(|task| task.completed).collect(),
    }
}

/// Daily sheet: one entry per employee, defaulting to ABSENT when unmarked.
///
/// Stored records keep the employee name captured when they were marked.
pub fn attendance_roster(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    day: i64,
) -> Vec<RosterEntry> {
    let day = normalize_day(day);
    employees
        .iter()
        .map(|employee| {
            match attendance
                .iter()
                .find(|record| record.employee_id == employee.id && record.day == day)
            {
                Some(record) => RosterEntry {
                    employee_id: employee.id,
                    employee_name: record.employee_name.clone(),
                    day,
                    status: record.status,
                    record_id: Some(record.id),
                },
                None => RosterEntry {
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    day,
                    status: AttendanceStatus::Absent,
                    record_id: None,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        attendance_roster, average_performance, average_rating, employee_dashboard, overview,
        performance_summary, rate, top_performers,
    };
    use crate::dashboard::{DashboardState, OverviewFilter};
    use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::model::day::normalize_day;
    use crate::model::employee::Employee;
    use crate::model::task::Task;

    const DAY: i64 = 1_717_000_000_000;

    fn employee(id: i64, name: &str, performance: f64, rating: i64) -> Employee {
        let mut employee = Employee::new(name)
            .with_performance(performance)
            .with_rating(rating);
        employee.id = id;
        employee
    }

    fn task(id: i64, employee_id: i64, completed: bool) -> Task {
        let mut task = Task::new(format!("task {id}"), "", employee_id).with_completed(completed);
        task.id = id;
        task
    }

    fn record(id: i64, employee_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(employee_id, "captured", DAY, status);
        record.id = id;
        record
    }

    #[test]
    fn rate_is_zero_for_empty_total() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(1, 4), 0.25);
    }

    #[test]
    fn empty_roster_yields_no_employee() {
        assert_eq!(employee_dashboard(Some(1), &[], &[], &[]), DashboardState::NoEmployee);
    }

    #[test]
    fn unknown_selection_falls_back_to_first_employee() {
        let employees = vec![employee(1, "Ada", 0.5, 3), employee(2, "Bo", 0.7, 4)];
        let state = employee_dashboard(Some(99), &employees, &[], &[]);
        assert_eq!(state.dashboard().map(|d| d.employee.id), Some(1));
    }

    #[test]
    fn employee_without_tasks_or_attendance_has_zero_rates() {
        let employees = vec![employee(1, "Ada", 0.5, 3)];
        let state = employee_dashboard(None, &employees, &[task(1, 2, true)], &[]);
        let dashboard = state.dashboard().expect("ready dashboard");
        assert_eq!(dashboard.total_tasks, 0);
        assert_eq!(dashboard.completion_rate, 0.0);
        assert_eq!(dashboard.attendance_rate, 0.0);
        assert!(!dashboard.completion_rate.is_nan());
    }

    #[test]
    fn partitions_tasks_and_attendance_by_selected_employee() {
        let employees = vec![employee(1, "Ada", 0.5, 3), employee(2, "Bo", 0.7, 4)];
        let tasks = vec![task(1, 2, true), task(2, 2, false), task(3, 1, true)];
        let attendance = vec![
            record(1, 2, AttendanceStatus::Present),
            record(2, 2, AttendanceStatus::Leave),
            record(3, 2, AttendanceStatus::Present),
            record(4, 2, AttendanceStatus::Absent),
            record(5, 1, AttendanceStatus::Absent),
        ];

        let state = employee_dashboard(Some(2), &employees, &tasks, &attendance);
        let dashboard = state.dashboard().expect("ready dashboard");
        assert_eq!(dashboard.employee.name, "Bo");
        assert_eq!(dashboard.total_tasks, 2);
        assert_eq!(dashboard.completed_tasks, 1);
        assert_eq!(dashboard.completion_rate, 0.5);
        assert_eq!(dashboard.attendance_counts.present, 2);
        assert_eq!(dashboard.attendance_counts.total(), 4);
        assert_eq!(dashboard.attendance_rate, 0.5);
    }

    #[test]
    fn fleet_averages_are_zero_for_empty_roster() {
        assert_eq!(average_performance(&[]), 0.0);
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn top_performers_sorted_descending_and_truncated() {
        let employees = vec![
            employee(1, "A", 0.9, 5),
            employee(2, "B", 0.5, 2),
            employee(3, "C", 0.95, 4),
        ];
        let top = top_performers(&employees, 2);
        assert_eq!(top.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 1]);

        let single = top_performers(&employees[..2], 1);
        assert_eq!(single.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn overview_search_is_case_insensitive() {
        let employees = vec![employee(1, "Grace Hopper", 0.8, 4), employee(2, "Alan", 0.6, 2)];
        let tasks = vec![task(1, 1, true), task(2, 2, false)];
        let filter = OverviewFilter {
            query: "HOP".to_string(),
            ..OverviewFilter::default()
        };

        let result = overview(&filter, &employees, &tasks, &[]);
        assert_eq!(result.employee_count, 2);
        assert_eq!(result.completed_tasks, 1);
        assert!((result.average_performance - 0.7).abs() < 1e-9);
        assert_eq!(result.average_rating, 3.0);
        assert_eq!(result.matching_employees.len(), 1);
        assert!(result.matching_tasks.is_empty());
    }

    #[test]
    fn performance_summary_keeps_last_seven_tasks() {
        let tasks: Vec<Task> = (1..=9).map(|id| task(id, 1, id % 3 == 0)).collect();
        let summary = performance_summary(&tasks, &[record(1, 1, AttendanceStatus::Present)]);
        assert_eq!(summary.total_tasks, 9);
        assert_eq!(summary.completed_tasks, 3);
        assert_eq!(summary.pending_tasks, 6);
        assert_eq!(summary.attendance_rate, 1.0);
        assert_eq!(
            summary.recent_completion,
            vec![true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn roster_defaults_unmarked_employees_to_absent() {
        let employees = vec![employee(1, "Ada", 0.5, 3), employee(2, "Bo", 0.7, 4)];
        let attendance = vec![record(7, 2, AttendanceStatus::Leave)];

        let roster = attendance_roster(&employees, &attendance, DAY + 60_000);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].status, AttendanceStatus::Absent);
        assert_eq!(roster[0].record_id, None);
        assert_eq!(roster[0].day, normalize_day(DAY));
        assert_eq!(roster[1].status, AttendanceStatus::Leave);
        assert_eq!(roster[1].record_id, Some(7));
        assert_eq!(roster[1].employee_name, "captured");
    }
}
