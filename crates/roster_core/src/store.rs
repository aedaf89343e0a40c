//! Shared roster store: one SQLite connection plus a live snapshot of every
//! table.
//!
//! # Responsibility
//! - Serialize access to the single connection.
//! - Republish the snapshot after every successful mutation.
//! - Hand out live subscriptions per table.
//!
//! # Invariants
//! - The snapshot is loaded before the store is returned, so subscribers
//!   never observe an "unloaded" table.
//! - One write is one transaction and at most one publication: every table
//!   it touched changes in the same snapshot, and a failed write changes
//!   neither storage nor the snapshot.
//! - Publication happens while the connection lock is held, so the snapshot
//!   order matches the write order.

use crate::db::{open_db, open_db_in_memory};
use crate::live::{LiveQuery, Rows};
use crate::model::activity::Activity;
use crate::model::attendance::AttendanceRecord;
use crate::model::day::normalize_day;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::task::Task;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoResult;
use log::{error, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Tables with live snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Employees,
    Tasks,
    Attendance,
    Activities,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Tasks => "tasks",
            Self::Attendance => "attendance_records",
            Self::Activities => "activities",
        }
    }
}

const ALL_TABLES: &[Table] = &[
    Table::Employees,
    Table::Tasks,
    Table::Attendance,
    Table::Activities,
];

/// Tables touched by deleting an employee (foreign-key cascade).
pub const EMPLOYEE_CASCADE: &[Table] = &[Table::Employees, Table::Tasks, Table::Attendance];

/// Every table's ordered rows as of one committed write.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Ordered by name.
    pub employees: Rows<Employee>,
    pub tasks: Rows<Task>,
    pub attendance: Rows<AttendanceRecord>,
    /// Newest first.
    pub activities: Rows<Activity>,
}

impl StoreSnapshot {
    fn reload(&mut self, conn: &Connection, tables: &[Table]) -> RepoResult<()> {
        for table in tables {
            match table {
                Table::Employees => {
                    self.employees = Arc::new(SqliteEmployeeRepository::new(conn).list_employees()?);
                }
                Table::Tasks => {
                    self.tasks = Arc::new(SqliteTaskRepository::new(conn).list_tasks()?);
                }
                Table::Attendance => {
                    self.attendance =
                        Arc::new(SqliteAttendanceRepository::new(conn).list_records()?);
                }
                Table::Activities => {
                    self.activities =
                        Arc::new(SqliteActivityRepository::new(conn).list_activities()?);
                }
            }
        }
        Ok(())
    }
}

fn employee_table(snapshot: &StoreSnapshot) -> &Rows<Employee> {
    &snapshot.employees
}

fn task_table(snapshot: &StoreSnapshot) -> &Rows<Task> {
    &snapshot.tasks
}

fn attendance_table(snapshot: &StoreSnapshot) -> &Rows<AttendanceRecord> {
    &snapshot.attendance
}

fn activity_table(snapshot: &StoreSnapshot) -> &Rows<Activity> {
    &snapshot.activities
}

/// Connection owner and publisher of live table snapshots.
pub struct Store {
    conn: Mutex<Connection>,
    snapshot: watch::Sender<StoreSnapshot>,
}

impl Store {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps a migrated connection and loads the initial snapshot.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        let mut snapshot = StoreSnapshot::default();
        snapshot.reload(&conn, ALL_TABLES)?;

        info!(
            "event=store_open module=store status=ok employees={} tasks={} attendance={} activities={}",
            snapshot.employees.len(),
            snapshot.tasks.len(),
            snapshot.attendance.len(),
            snapshot.activities.len()
        );

        Ok(Self {
            conn: Mutex::new(conn),
            snapshot: watch::Sender::new(snapshot),
        })
    }

    /// Runs a read-only closure against the connection.
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Runs a mutation in one transaction and republishes `touched` tables.
    ///
    /// On error the transaction rolls back and nothing is published.
    pub fn write<T>(
        &self,
        touched: &[Table],
        f: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.conn.lock();
        let tx = conn.unchecked_transaction()?;
        let value = f(&tx)?;

        let mut next = self.snapshot.borrow().clone();
        if let Err(err) = next.reload(&tx, touched) {
            error!(
                "event=store_publish module=store status=error tables={} error_code={}",
                touched.len(),
                err.code()
            );
            return Err(err);
        }
        tx.commit()?;

        if !touched.is_empty() {
            self.snapshot.send_replace(next);
        }
        Ok(value)
    }

    /// Receiver of whole-store snapshots; one change per committed write.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Current employee snapshot, ordered by name.
    pub fn employees(&self) -> Rows<Employee> {
        Arc::clone(&self.snapshot.borrow().employees)
    }

    pub fn tasks(&self) -> Rows<Task> {
        Arc::clone(&self.snapshot.borrow().tasks)
    }

    pub fn attendance(&self) -> Rows<AttendanceRecord> {
        Arc::clone(&self.snapshot.borrow().attendance)
    }

    /// Current activity snapshot, newest first.
    pub fn activities(&self) -> Rows<Activity> {
        Arc::clone(&self.snapshot.borrow().activities)
    }

    pub fn watch_employees(&self) -> LiveQuery<Employee> {
        LiveQuery::new(self.subscribe(), employee_table)
    }

    pub fn watch_tasks(&self) -> LiveQuery<Task> {
        LiveQuery::new(self.subscribe(), task_table)
    }

    pub fn watch_tasks_for_employee(&self, employee_id: EmployeeId) -> LiveQuery<Task> {
        self.watch_tasks()
            .filtered(move |task| task.employee_id == employee_id)
    }

    pub fn watch_attendance(&self) -> LiveQuery<AttendanceRecord> {
        LiveQuery::new(self.subscribe(), attendance_table)
    }

    /// Records of one calendar day; `day` is normalized first.
    pub fn watch_attendance_for_day(&self, day: i64) -> LiveQuery<AttendanceRecord> {
        let day = normalize_day(day);
        self.watch_attendance().filtered(move |record| record.day == day)
    }

    pub fn watch_activities(&self) -> LiveQuery<Activity> {
        LiveQuery::new(self.subscribe(), activity_table)
    }

    pub fn watch_recent_activities(&self, limit: usize) -> LiveQuery<Activity> {
        self.watch_activities().limited(limit)
    }
}
