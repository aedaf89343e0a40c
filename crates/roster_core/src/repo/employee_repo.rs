//! Employee repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_employees` is ordered by `name ASC, id ASC`.
//! - Deleting an employee cascades to tasks and attendance through the
//!   schema's foreign keys; activity rows are left untouched.

use crate::model::employee::{validate_performance, validate_rating, Employee, EmployeeId};
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    designation,
    department,
    phone_number,
    performance,
    rating
FROM employees";

const ENTITY: &str = "employee";

/// Repository interface for the employee roster.
pub trait EmployeeRepository {
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Exact-name lookup; returns the lowest id when names collide.
    fn get_employee_by_name(&self, name: &str) -> RepoResult<Option<Employee>>;
    /// Inserts a new row and returns the generated id. `employee.id` is ignored.
    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Replaces every mutable column of an existing employee.
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn update_performance(&self, id: EmployeeId, performance: f64) -> RepoResult<()>;
    fn update_rating(&self, id: EmployeeId, rating: i64) -> RepoResult<()>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn get_employee_by_name(&self, name: &str) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
                [name],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employees (
                name,
                email,
                designation,
                department,
                phone_number,
                performance,
                rating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                employee.name.trim(),
                employee.email.trim(),
                employee.designation.as_str(),
                employee.department.as_str(),
                employee.phone_number.as_str(),
                employee.performance,
                employee.rating,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?1,
                email = ?2,
                designation = ?3,
                department = ?4,
                phone_number = ?5,
                performance = ?6,
                rating = ?7
             WHERE id = ?8;",
            params![
                employee.name.trim(),
                employee.email.trim(),
                employee.designation.as_str(),
                employee.department.as_str(),
                employee.phone_number.as_str(),
                employee.performance,
                employee.rating,
                employee.id,
            ],
        )?;
        ensure_changed(changed, ENTITY, employee.id)
    }

    fn update_performance(&self, id: EmployeeId, performance: f64) -> RepoResult<()> {
        validate_performance(performance)?;
        let changed = self.conn.execute(
            "UPDATE employees SET performance = ?1 WHERE id = ?2;",
            params![performance, id],
        )?;
        ensure_changed(changed, ENTITY, id)
    }

    fn update_rating(&self, id: EmployeeId, rating: i64) -> RepoResult<()> {
        validate_rating(rating)?;
        let changed = self.conn.execute(
            "UPDATE employees SET rating = ?1 WHERE id = ?2;",
            params![rating, id],
        )?;
        ensure_changed(changed, ENTITY, id)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        ensure_changed(changed, ENTITY, id)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        designation: row.get("designation")?,
        department: row.get("department")?,
        phone_number: row.get("phone_number")?,
        performance: row.get("performance")?,
        rating: row.get("rating")?,
    })
}
