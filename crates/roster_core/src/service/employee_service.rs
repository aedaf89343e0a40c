//! Employee roster use-case service.
//!
//! # Invariants
//! - Adds, edits and score changes each append one activity entry.
//! - Deleting an employee cascades to tasks and attendance but leaves the
//!   activity feed untouched.

use crate::live::LiveQuery;
use crate::model::activity::{Activity, ActivityKind};
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::service::{ServiceError, ServiceResult};
use crate::store::{Store, Table, EMPLOYEE_CASCADE};
use log::info;
use std::sync::Arc;

/// Use-case service for the employee roster.
pub struct EmployeeService {
    store: Arc<Store>,
}

impl EmployeeService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Live roster ordered by name.
    pub fn watch_employees(&self) -> LiveQuery<Employee> {
        self.store.watch_employees()
    }

    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self
            .store
            .read(|conn| SqliteEmployeeRepository::new(conn).get_employee(id))?)
    }

    pub fn get_employee_by_name(&self, name: &str) -> ServiceResult<Option<Employee>> {
        Ok(self
            .store
            .read(|conn| SqliteEmployeeRepository::new(conn).get_employee_by_name(name))?)
    }

    /// Inserts a new employee and returns it with its generated id.
    pub fn add_employee(&self, employee: &Employee) -> ServiceResult<Employee> {
        let saved = self
            .store
            .write(&[Table::Employees, Table::Activities], |conn| {
                let id = SqliteEmployeeRepository::new(conn).insert_employee(employee)?;
                let activity = Activity::new(
                    ActivityKind::EmployeeAdded,
                    "New Employee Added",
                    describe_join(employee),
                )
                .for_employee(id);
                SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                Ok(Employee {
                    id,
                    ..employee.clone()
                })
            })?;

        info!("event=employee_add module=service status=ok employee_id={}", saved.id);
        Ok(saved)
    }

    /// Replaces an existing employee's editable fields.
    pub fn update_employee(&self, employee: &Employee) -> ServiceResult<()> {
        self.store
            .write(&[Table::Employees, Table::Activities], |conn| {
                SqliteEmployeeRepository::new(conn).update_employee(employee)?;
                let activity = Activity::new(
                    ActivityKind::EmployeeUpdated,
                    "Employee Updated",
                    format!("{}'s profile was updated", employee.name.trim()),
                )
                .for_employee(employee.id);
                SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                Ok(())
            })?;

        info!(
            "event=employee_update module=service status=ok employee_id={}",
            employee.id
        );
        Ok(())
    }

    pub fn update_performance(&self, id: EmployeeId, performance: f64) -> ServiceResult<()> {
        self.update_score(id, |repo| repo.update_performance(id, performance), |name| {
            format!(
                "{name}'s performance set to {}%",
                (performance * 100.0).round() as i64
            )
        })
    }

    pub fn update_rating(&self, id: EmployeeId, rating: i64) -> ServiceResult<()> {
        self.update_score(id, |repo| repo.update_rating(id, rating), |name| {
            format!("{name} rated {rating}/5")
        })
    }

    /// Deletes an employee with their tasks and attendance records.
    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        self.store.write(EMPLOYEE_CASCADE, |conn| {
            SqliteEmployeeRepository::new(conn).delete_employee(id)
        })?;
        info!("event=employee_delete module=service status=ok employee_id={id}");
        Ok(())
    }

    fn update_score(
        &self,
        id: EmployeeId,
        apply: impl FnOnce(&SqliteEmployeeRepository<'_>) -> crate::repo::RepoResult<()>,
        describe: impl FnOnce(&str) -> String,
    ) -> ServiceResult<()> {
        self.store
            .write(&[Table::Employees, Table::Activities], |conn| {
                let repo = SqliteEmployeeRepository::new(conn);
                apply(&repo)?;
                let name = repo
                    .get_employee(id)?
                    .map(|employee| employee.name)
                    .unwrap_or_default();
                let activity = Activity::new(
                    ActivityKind::PerformanceUpdated,
                    "Performance Updated",
                    describe(&name),
                )
                .for_employee(id);
                SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                Ok(())
            })
            .map_err(ServiceError::from)?;

        info!("event=employee_score module=service status=ok employee_id={id}");
        Ok(())
    }
}

fn describe_join(employee: &Employee) -> String {
    let designation = employee.designation.trim();
    if designation.is_empty() {
        format!("{} joined the team", employee.name.trim())
    } else {
        format!("{} joined as {designation}", employee.name.trim())
    }
}
