use roster_core::db::open_db_in_memory;
use roster_core::model::activity::{Activity, ActivityKind};
use roster_core::model::attendance::{AttendanceRecord, AttendanceStatus};
use roster_core::model::day::normalize_day;
use roster_core::model::employee::Employee;
use roster_core::model::ValidationError;
use roster_core::repo::attendance_repo::MarkOutcome;
use roster_core::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use roster_core::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use roster_core::{
    ActivityService, AttendanceService, EmployeeService, NewTask, ProfileService, ServiceError,
    Store, TaskService,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const DAY: i64 = 1_717_000_000_000;
const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;

struct Services {
    store: Arc<Store>,
    employees: EmployeeService,
    tasks: TaskService,
    attendance: AttendanceService,
    activities: ActivityService,
}

fn services() -> Services {
    let store = Arc::new(Store::open_in_memory().unwrap());
    Services {
        employees: EmployeeService::new(Arc::clone(&store)),
        tasks: TaskService::new(Arc::clone(&store)),
        attendance: AttendanceService::new(Arc::clone(&store)),
        activities: ActivityService::new(Arc::clone(&store)),
        store,
    }
}

fn new_task(title: &str, employee_id: i64) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        employee_id: Some(employee_id),
    }
}

#[test]
fn adding_employee_publishes_snapshot_and_activity() {
    let s = services();
    let ada = s
        .employees
        .add_employee(&Employee::new("Ada").with_designation("Engineer"))
        .unwrap();

    assert!(ada.id > 0);
    assert_eq!(s.store.employees().len(), 1);

    let feed = s.store.activities();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, ActivityKind::EmployeeAdded);
    assert_eq!(feed[0].title, "New Employee Added");
    assert_eq!(feed[0].related_employee_id, Some(ada.id));
}

#[test]
fn invalid_employee_leaves_store_untouched() {
    let s = services();
    let err = s.employees.add_employee(&Employee::new(" ")).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::InvalidInput(ValidationError::BlankField("name"))
    ));
    assert!(s.store.employees().is_empty());
    assert!(s.store.activities().is_empty());
}

#[test]
fn score_updates_log_performance_activity() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();

    s.employees.update_performance(ada.id, 0.75).unwrap();
    s.employees.update_rating(ada.id, 4).unwrap();

    let stored = s.employees.get_employee(ada.id).unwrap().unwrap();
    assert_eq!(stored.performance, 0.75);
    assert_eq!(stored.rating, 4);

    let feed = s.store.activities();
    let score_entries = feed
        .iter()
        .filter(|activity| activity.kind == ActivityKind::PerformanceUpdated)
        .count();
    assert_eq!(score_entries, 2);
}

#[test]
fn unknown_employee_score_update_is_not_found() {
    let s = services();
    let err = s.employees.update_rating(99, 3).unwrap_err();
    assert!(matches!(err, ServiceError::EmployeeNotFound(99)));
}

#[test]
fn task_creation_logs_assignment() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();

    let task = s.tasks.add_task(&new_task("Write report", ada.id)).unwrap();

    assert!(task.id > 0);
    assert!(!task.completed);
    let latest = &s.store.activities()[0];
    assert_eq!(latest.kind, ActivityKind::TaskCreated);
    assert_eq!(latest.title, "New Task Assigned");
    assert_eq!(latest.description, "Task 'Write report' assigned to Ada");
    assert_eq!(latest.related_task_id, Some(task.id));
}

#[test]
fn task_form_validation_runs_before_storage() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();

    let blank = s.tasks.add_task(&new_task("  ", ada.id)).unwrap_err();
    assert!(matches!(
        blank,
        ServiceError::InvalidInput(ValidationError::BlankField("title"))
    ));

    let unassigned = s
        .tasks
        .add_task(&NewTask {
            title: "Review".to_string(),
            description: String::new(),
            employee_id: None,
        })
        .unwrap_err();
    assert!(matches!(unassigned, ServiceError::NoEmployeeSelected));

    let missing = s.tasks.add_task(&new_task("Review", 404)).unwrap_err();
    assert!(matches!(missing, ServiceError::EmployeeNotFound(404)));

    assert!(s.store.tasks().is_empty());
}

#[test]
fn completing_task_logs_once() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();
    let task = s.tasks.add_task(&new_task("Audit", ada.id)).unwrap();

    let done = s.tasks.toggle_task(&task).unwrap();
    assert!(done.completed);
    assert_eq!(done.id, task.id);
    s.tasks.update_task_status(&done, true).unwrap();

    let completions: Vec<_> = s
        .store
        .activities()
        .iter()
        .filter(|activity| activity.kind == ActivityKind::TaskCompleted)
        .cloned()
        .collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].description, "Task 'Audit' completed by Ada");

    let reopened = s.tasks.toggle_task(&done).unwrap();
    assert!(!reopened.completed);
    assert!(!s.store.tasks()[0].completed);
}

#[test]
fn toggling_missing_task_is_not_found() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();
    let task = s.tasks.add_task(&new_task("Audit", ada.id)).unwrap();
    s.tasks.delete_task(&task).unwrap();

    let err = s.tasks.toggle_task(&task).unwrap_err();
    assert!(matches!(err, ServiceError::TaskNotFound(id) if id == task.id));
}

#[test]
fn marking_attendance_twice_updates_in_place() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();

    let first = s
        .attendance
        .mark_attendance(ada.id, DAY, AttendanceStatus::Present)
        .unwrap();
    let second = s
        .attendance
        .mark_attendance(ada.id, DAY + 60_000, AttendanceStatus::Absent)
        .unwrap();
    s.attendance
        .mark_attendance(ada.id, DAY + ONE_DAY_MS, AttendanceStatus::Leave)
        .unwrap();

    assert_eq!(first.outcome, MarkOutcome::Inserted);
    assert_eq!(second.outcome, MarkOutcome::Updated);
    assert!(first.record.id > 0);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.status, AttendanceStatus::Absent);

    let records = s.store.attendance();
    assert_eq!(records.len(), 2);
    let today = records
        .iter()
        .find(|record| record.day == normalize_day(DAY))
        .unwrap();
    assert_eq!(today.status, AttendanceStatus::Absent);
    assert_eq!(today.employee_name, "Ada");

    let marked = s
        .store
        .activities()
        .iter()
        .filter(|activity| activity.kind == ActivityKind::AttendanceMarked)
        .count();
    assert_eq!(marked, 3);
}

#[test]
fn marking_record_upserts_without_activity() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();
    let feed_before = s.store.activities().len();

    let first = s
        .attendance
        .mark_record(&AttendanceRecord::new(ada.id, "Ada", DAY, AttendanceStatus::Present))
        .unwrap();
    let second = s
        .attendance
        .mark_record(&AttendanceRecord::new(
            ada.id,
            "Renamed",
            DAY + 60_000,
            AttendanceStatus::Leave,
        ))
        .unwrap();

    assert_eq!(first, MarkOutcome::Inserted);
    assert_eq!(second, MarkOutcome::Updated);
    let records = s.store.attendance();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].day, normalize_day(DAY));
    assert_eq!(records[0].status, AttendanceStatus::Leave);
    assert_eq!(records[0].employee_name, "Ada");
    assert_eq!(s.store.activities().len(), feed_before);
}

#[test]
fn marking_attendance_for_unknown_employee_fails() {
    let s = services();
    let err = s
        .attendance
        .mark_attendance(5, DAY, AttendanceStatus::Present)
        .unwrap_err();
    assert!(matches!(err, ServiceError::EmployeeNotFound(5)));
    assert!(s.store.attendance().is_empty());
}

#[test]
fn roster_defaults_unmarked_employees_to_absent() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();
    let bob = s.employees.add_employee(&Employee::new("Bob")).unwrap();
    s.attendance
        .mark_attendance(ada.id, DAY, AttendanceStatus::Present)
        .unwrap();

    let roster = s.attendance.roster_for_day(DAY + 60_000);
    assert_eq!(roster.len(), 2);
    let ada_entry = roster.iter().find(|e| e.employee_id == ada.id).unwrap();
    let bob_entry = roster.iter().find(|e| e.employee_id == bob.id).unwrap();
    assert_eq!(ada_entry.status, AttendanceStatus::Present);
    assert!(ada_entry.record_id.is_some());
    assert_eq!(bob_entry.status, AttendanceStatus::Absent);
    assert!(bob_entry.record_id.is_none());
}

#[test]
fn deleting_employee_cascades_and_leaves_feed() {
    let s = services();
    let ada = s.employees.add_employee(&Employee::new("Ada")).unwrap();
    let task = s.tasks.add_task(&new_task("Audit", ada.id)).unwrap();
    s.attendance
        .mark_attendance(ada.id, DAY, AttendanceStatus::Present)
        .unwrap();
    let feed_before = s.store.activities().len();

    s.employees.delete_employee(ada.id).unwrap();

    assert!(s.store.employees().is_empty());
    assert!(s.store.tasks().is_empty());
    assert!(s.store.attendance().is_empty());
    let feed = s.store.activities();
    assert_eq!(feed.len(), feed_before);
    assert!(feed
        .iter()
        .any(|activity| activity.related_task_id == Some(task.id)));
}

#[test]
fn activity_feed_can_be_pruned() {
    let s = services();
    s.employees.add_employee(&Employee::new("Ada")).unwrap();
    s.employees.add_employee(&Employee::new("Bob")).unwrap();

    let newest = s.store.activities()[0].id;
    s.activities.delete(newest).unwrap();
    assert_eq!(s.store.activities().len(), 1);

    assert_eq!(s.activities.clear().unwrap(), 1);
    assert!(s.store.activities().is_empty());
}

#[test]
fn profile_defaults_and_overrides() {
    let store = Arc::new(Store::open_in_memory().unwrap());
    let profile = ProfileService::new(store);

    let initial = profile.profile().unwrap();
    assert_eq!(initial.user_name, "David Chen");
    assert!(initial.photo_uri.is_none());

    profile.set_user_name("  Ada ").unwrap();
    profile.set_photo_uri(Some("content://photo/1")).unwrap();
    let updated = profile.profile().unwrap();
    assert_eq!(updated.user_name, "Ada");
    assert_eq!(updated.photo_uri.as_deref(), Some("content://photo/1"));

    profile.set_user_name("").unwrap();
    profile.set_photo_uri(None).unwrap();
    assert_eq!(profile.profile().unwrap().user_name, "David Chen");

    profile.set_user_name("Bob").unwrap();
    assert_eq!(profile.clear().unwrap(), 1);
    assert_eq!(profile.profile().unwrap().user_name, "David Chen");
}

#[tokio::test]
async fn recent_activity_limit_zero_uses_default_of_ten() {
    let s = services();
    for index in 0..12 {
        s.activities
            .record(&Activity::new(
                ActivityKind::PerformanceUpdated,
                format!("entry {index}"),
                "",
            ))
            .unwrap();
    }

    let mut recent = s.activities.watch_recent(0);
    let rows = timeout(Duration::from_secs(2), recent.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].title, "entry 11");
    assert_eq!(s.store.activities().len(), 12);
}

fn store_with_failing_activity_log() -> Arc<Store> {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_activity BEFORE INSERT ON activities
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();
    Arc::new(Store::from_connection(conn).unwrap())
}

#[test]
fn failed_activity_insert_rolls_back_employee() {
    let store = store_with_failing_activity_log();
    let employees = EmployeeService::new(Arc::clone(&store));

    let err = employees
        .add_employee(&Employee::new("Ada"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));

    let persisted = store
        .read(|conn| SqliteEmployeeRepository::new(conn).list_employees())
        .unwrap();
    assert!(persisted.is_empty());
    assert!(store.employees().is_empty());
    assert!(store.activities().is_empty());
}

#[test]
fn failed_activity_insert_rolls_back_task() {
    let conn = open_db_in_memory().unwrap();
    let ada = SqliteEmployeeRepository::new(&conn)
        .insert_employee(&Employee::new("Ada"))
        .unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_activity BEFORE INSERT ON activities
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();
    let store = Arc::new(Store::from_connection(conn).unwrap());
    let tasks = TaskService::new(Arc::clone(&store));

    assert!(tasks.add_task(&new_task("Audit", ada)).is_err());

    let persisted = store
        .read(|conn| SqliteTaskRepository::new(conn).list_tasks())
        .unwrap();
    assert!(persisted.is_empty());
    assert!(store.tasks().is_empty());
    assert_eq!(store.employees().len(), 1);
}
