//! Task assignment use-case service.
//!
//! # Invariants
//! - New tasks start not completed.
//! - Status changes replace the stored task value; identity is unchanged.
//! - `TASK_COMPLETED` is logged only when a stored task moves from open to
//!   completed.

use crate::live::LiveQuery;
use crate::model::activity::{Activity, ActivityKind};
use crate::model::employee::EmployeeId;
use crate::model::task::Task;
use crate::model::ValidationError;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::{ServiceError, ServiceResult};
use crate::store::{Store, Table};
use log::info;
use rusqlite::Connection;
use std::sync::Arc;

const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// Task assignment form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub employee_id: Option<EmployeeId>,
}

impl NewTask {
    /// Form-level checks run before the task reaches storage.
    pub fn validate(&self) -> ServiceResult<EmployeeId> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::InvalidInput(ValidationError::BlankField(
                "title",
            )));
        }
        self.employee_id.ok_or(ServiceError::NoEmployeeSelected)
    }
}

/// Use-case service for task assignment.
pub struct TaskService {
    store: Arc<Store>,
}

impl TaskService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn watch_tasks(&self) -> LiveQuery<Task> {
        self.store.watch_tasks()
    }

    pub fn watch_tasks_for_employee(&self, employee_id: EmployeeId) -> LiveQuery<Task> {
        self.store.watch_tasks_for_employee(employee_id)
    }

    pub fn get_task(&self, id: i64) -> ServiceResult<Option<Task>> {
        Ok(self
            .store
            .read(|conn| SqliteTaskRepository::new(conn).get_task(id))?)
    }

    /// Assigns a new task and logs `TASK_CREATED`.
    pub fn add_task(&self, request: &NewTask) -> ServiceResult<Task> {
        let employee_id = request.validate()?;
        let task = Task::new(
            request.title.trim(),
            request.description.trim(),
            employee_id,
        );

        let saved = self
            .store
            .write(&[Table::Tasks, Table::Activities], |conn| {
                let id = SqliteTaskRepository::new(conn)
                    .insert_task(&task)
                    .map_err(|err| missing_owner(conn, employee_id, err))?;
                let name = employee_name(conn, employee_id)?;
                let activity = Activity::new(
                    ActivityKind::TaskCreated,
                    "New Task Assigned",
                    format!("Task '{}' assigned to {name}", task.title),
                )
                .for_employee(employee_id)
                .for_task(id);
                SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                Ok(Task { id, ..task.clone() })
            })?;

        info!(
            "event=task_add module=service status=ok task_id={} employee_id={employee_id}",
            saved.id
        );
        Ok(saved)
    }

    /// Replaces the completion flag of `task` and returns the new value.
    pub fn update_task_status(&self, task: &Task, completed: bool) -> ServiceResult<Task> {
        let updated = task.with_completed(completed);

        self.store
            .write(&[Table::Tasks, Table::Activities], |conn| {
                let repo = SqliteTaskRepository::new(conn);
                let was_completed = repo
                    .get_task(task.id)?
                    .map(|stored| stored.completed)
                    .ok_or(RepoError::NotFound {
                        entity: "task",
                        id: task.id,
                    })?;
                repo.update_task(&updated)?;

                if completed && !was_completed {
                    let name = employee_name(conn, task.employee_id)?;
                    let activity = Activity::new(
                        ActivityKind::TaskCompleted,
                        "Task Completed",
                        format!("Task '{}' completed by {name}", task.title),
                    )
                    .for_employee(task.employee_id)
                    .for_task(task.id);
                    SqliteActivityRepository::new(conn).insert_activity(&activity)?;
                }
                Ok(())
            })?;

        info!(
            "event=task_status module=service status=ok task_id={} completed={completed}",
            task.id
        );
        Ok(updated)
    }

    /// Flips the completion flag of `task`.
    pub fn toggle_task(&self, task: &Task) -> ServiceResult<Task> {
        self.update_task_status(task, !task.completed)
    }

    /// Deletes `task`; activity rows referencing it are kept.
    pub fn delete_task(&self, task: &Task) -> ServiceResult<()> {
        self.store.write(&[Table::Tasks], |conn| {
            SqliteTaskRepository::new(conn).delete_task(task.id)
        })?;
        info!("event=task_delete module=service status=ok task_id={}", task.id);
        Ok(())
    }
}

fn employee_name(conn: &Connection, employee_id: EmployeeId) -> RepoResult<String> {
    Ok(SqliteEmployeeRepository::new(conn)
        .get_employee(employee_id)?
        .map(|employee| employee.name)
        .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()))
}

/// Maps a foreign-key failure on insert to a not-found owner.
fn missing_owner(conn: &Connection, employee_id: EmployeeId, err: RepoError) -> RepoError {
    match SqliteEmployeeRepository::new(conn).get_employee(employee_id) {
        Ok(None) => RepoError::NotFound {
            entity: "employee",
            id: employee_id,
        },
        _ => err,
    }
}
