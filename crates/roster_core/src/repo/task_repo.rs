//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Task lists are ordered by `id ASC` (assignment order).
//! - `update_task` never changes identity; it replaces title, description,
//!   owner and completion flag of an existing row.

use crate::model::employee::EmployeeId;
use crate::model::task::{Task, TaskId};
use crate::repo::{bool_to_int, ensure_changed, int_to_bool, RepoResult};
use rusqlite::{params, Connection, Params, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    employee_id,
    is_completed
FROM tasks";

const ENTITY: &str = "task";

/// Repository interface for task assignment.
pub trait TaskRepository {
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn list_tasks_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Inserts a new row and returns the generated id. `task.id` is ignored.
    fn insert_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_tasks(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_tasks(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn list_tasks_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE employee_id = ?1 ORDER BY id ASC;"),
            [employee_id],
        )
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_tasks(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(tasks.pop())
    }

    fn insert_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (title, description, employee_id, is_completed)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.title.trim(),
                task.description.as_str(),
                task.employee_id,
                bool_to_int(task.completed),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                employee_id = ?3,
                is_completed = ?4
             WHERE id = ?5;",
            params![
                task.title.trim(),
                task.description.as_str(),
                task.employee_id,
                bool_to_int(task.completed),
                task.id,
            ],
        )?;
        ensure_changed(changed, ENTITY, task.id)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        ensure_changed(changed, ENTITY, id)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        employee_id: row.get("employee_id")?,
        completed: int_to_bool(row.get("is_completed")?, "tasks.is_completed")?,
    })
}
