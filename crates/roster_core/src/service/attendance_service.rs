//! Attendance use-case service.

use crate::dashboard::metrics::attendance_roster;
use crate::dashboard::RosterEntry;
use crate::live::LiveQuery;
use crate::model::activity::{Activity, ActivityKind};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::day::normalize_day;
use crate::model::employee::EmployeeId;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::attendance_repo::{AttendanceRepository, MarkOutcome, SqliteAttendanceRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::RepoError;
use crate::service::ServiceResult;
use crate::store::{Store, Table};
use chrono::{Local, TimeZone};
use log::info;
use std::sync::Arc;

/// Result of marking attendance: what happened and the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedAttendance {
    pub outcome: MarkOutcome,
    /// The cell's record after the write, with its row id.
    pub record: AttendanceRecord,
}

/// Use-case service for daily attendance.
pub struct AttendanceService {
    store: Arc<Store>,
}

impl AttendanceService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn watch_all(&self) -> LiveQuery<AttendanceRecord> {
        self.store.watch_attendance()
    }

    pub fn watch_day(&self, day: i64) -> LiveQuery<AttendanceRecord> {
        self.store.watch_attendance_for_day(day)
    }

    /// Marks `status` for an employee on the calendar day containing `day`.
    ///
    /// The employee's current name is captured into new records only.
    pub fn mark_attendance(
        &self,
        employee_id: EmployeeId,
        day: i64,
        status: AttendanceStatus,
    ) -> ServiceResult<MarkedAttendance> {
        let marked = self
            .store
            .write(&[Table::Attendance, Table::Activities], |conn| {
                let employee = SqliteEmployeeRepository::new(conn)
                    .get_employee(employee_id)?
                    .ok_or(RepoError::NotFound {
                        entity: "employee",
                        id: employee_id,
                    })?;
                let record = AttendanceRecord::new(employee_id, employee.name, day, status);
                let attendance = SqliteAttendanceRepository::new(conn);
                let outcome = attendance.mark_attendance(&record)?;
                let stored = attendance.find_record(employee_id, record.day)?.ok_or(
                    RepoError::NotFound {
                        entity: "attendance",
                        id: employee_id,
                    },
                )?;

                let activity = Activity::new(
                    ActivityKind::AttendanceMarked,
                    "Attendance Marked",
                    format!(
                        "{} marked {} for {}",
                        record.employee_name,
                        status.as_str(),
                        format_day(record.day)
                    ),
                )
                .for_employee(employee_id);
                SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                Ok(MarkedAttendance {
                    outcome,
                    record: stored,
                })
            })?;

        info!(
            "event=attendance_mark module=service status=ok employee_id={employee_id} record_id={} outcome={:?}",
            marked.record.id, marked.outcome
        );
        Ok(marked)
    }

    /// Runs the upsert for a caller-built record without logging activity.
    pub fn mark_record(&self, record: &AttendanceRecord) -> ServiceResult<MarkOutcome> {
        Ok(self.store.write(&[Table::Attendance], |conn| {
            SqliteAttendanceRepository::new(conn).mark_attendance(record)
        })?)
    }

    /// Daily sheet from the current snapshots; unmarked employees read ABSENT.
    pub fn roster_for_day(&self, day: i64) -> Vec<RosterEntry> {
        let day = normalize_day(day);
        let employees = self.store.employees();
        let attendance = self.store.attendance();
        attendance_roster(&employees, &attendance, day)
    }
}

fn format_day(day: i64) -> String {
    Local
        .timestamp_millis_opt(day)
        .single()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| day.to_string())
}
