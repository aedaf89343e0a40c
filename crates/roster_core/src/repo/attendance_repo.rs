//! Attendance repository contract, upsert protocol and SQLite implementation.
//!
//! # Responsibility
//! - Persist daily attendance keyed by `(employee_id, day)`.
//! - Decide between insert and in-place status update when marking.
//!
//! # Invariants
//! - Every `day` written or queried is normalized first.
//! - At most one record per `(employee_id, day)` under non-concurrent use.
//!   Two concurrent first marks for the same cell can both observe "missing"
//!   and both insert; the insert path is `INSERT OR IGNORE` and there is no
//!   uniqueness constraint, so that race is tolerated rather than prevented.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::day::normalize_day;
use crate::model::employee::EmployeeId;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const ATTENDANCE_SELECT_SQL: &str = "SELECT
    id,
    employee_id,
    employee_name,
    day,
    status
FROM attendance_records";

/// What `mark_attendance` did to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// No record existed for the cell; one was inserted (or ignored on conflict).
    Inserted,
    /// A record existed; only its status was replaced.
    Updated,
}

/// Repository interface for attendance storage.
pub trait AttendanceRepository {
    /// All records ordered by `day DESC, employee_id ASC`.
    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>>;
    fn list_records_for_day(&self, day: i64) -> RepoResult<Vec<AttendanceRecord>>;
    fn find_record(&self, employee_id: EmployeeId, day: i64)
        -> RepoResult<Option<AttendanceRecord>>;
    /// Inserts a record, silently doing nothing on conflict.
    fn insert_record_or_ignore(&self, record: &AttendanceRecord) -> RepoResult<()>;
    /// Replaces the status of every record in the `(employee_id, day)` cell.
    fn update_status(
        &self,
        employee_id: EmployeeId,
        day: i64,
        status: AttendanceStatus,
    ) -> RepoResult<()>;

    /// Inserts or updates attendance for the record's `(employee_id, day)`.
    ///
    /// Existing records keep their id, day and captured employee name.
    fn mark_attendance(&self, record: &AttendanceRecord) -> RepoResult<MarkOutcome> {
        let day = normalize_day(record.day);
        match self.find_record(record.employee_id, day)? {
            None => {
                let normalized = AttendanceRecord {
                    day,
                    ..record.clone()
                };
                self.insert_record_or_ignore(&normalized)?;
                debug!(
                    "event=attendance_mark module=repo status=ok outcome=inserted employee_id={} day={day}",
                    record.employee_id
                );
                Ok(MarkOutcome::Inserted)
            }
            Some(existing) => {
                self.update_status(existing.employee_id, existing.day, record.status)?;
                debug!(
                    "event=attendance_mark module=repo status=ok outcome=updated employee_id={} day={day} record_id={}",
                    existing.employee_id, existing.id
                );
                Ok(MarkOutcome::Updated)
            }
        }
    }
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_records(&self, sql: &str, params: impl Params) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_attendance_row(row)?);
        }
        Ok(records)
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn list_records(&self) -> RepoResult<Vec<AttendanceRecord>> {
        self.query_records(
            &format!("{ATTENDANCE_SELECT_SQL} ORDER BY day DESC, employee_id ASC, id ASC;"),
            [],
        )
    }

    fn list_records_for_day(&self, day: i64) -> RepoResult<Vec<AttendanceRecord>> {
        self.query_records(
            &format!("{ATTENDANCE_SELECT_SQL} WHERE day = ?1 ORDER BY employee_id ASC, id ASC;"),
            [normalize_day(day)],
        )
    }

    fn find_record(
        &self,
        employee_id: EmployeeId,
        day: i64,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let mut records = self.query_records(
            &format!(
                "{ATTENDANCE_SELECT_SQL} WHERE employee_id = ?1 AND day = ?2 ORDER BY id ASC LIMIT 1;"
            ),
            params![employee_id, normalize_day(day)],
        )?;
        Ok(records.pop())
    }

    fn insert_record_or_ignore(&self, record: &AttendanceRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO attendance_records (employee_id, employee_name, day, status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                record.employee_id,
                record.employee_name.as_str(),
                normalize_day(record.day),
                record.status.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update_status(
        &self,
        employee_id: EmployeeId,
        day: i64,
        status: AttendanceStatus,
    ) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE attendance_records SET status = ?1 WHERE employee_id = ?2 AND day = ?3;",
            params![status.as_str(), employee_id, normalize_day(day)],
        )?;
        Ok(())
    }
}

fn parse_attendance_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let status_text: String = row.get("status")?;
    let status = AttendanceStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid attendance status `{status_text}` in attendance_records.status"
        ))
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        day: row.get("day")?,
        status,
    })
}
