//! Task assigned to one employee.

use crate::model::employee::EmployeeId;
use crate::model::{RowId, ValidationError};
use serde::{Deserialize, Serialize};

/// Task identity.
pub type TaskId = RowId;

/// Unit of work owned by an employee; removed when the owner is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Zero until the row has been inserted.
    pub id: TaskId,
    pub title: String,
    /// Free text, empty when not provided.
    pub description: String,
    pub employee_id: EmployeeId,
    pub completed: bool,
}

impl Task {
    /// Creates an unsaved, not-yet-completed task.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            employee_id,
            completed: false,
        }
    }

    /// Returns a copy with the completion flag replaced.
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankField("title"));
        }
        Ok(())
    }
}
