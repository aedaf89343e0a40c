//! Roster use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs over the store.
//! - Record activity-feed entries for user-visible changes.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - A mutation and its activity entry share one store transaction: both
//!   land and are republished together, or neither does.

use crate::model::employee::EmployeeId;
use crate::model::task::TaskId;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity_service;
pub mod attendance_service;
pub mod employee_service;
pub mod profile_service;
pub mod task_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching storage.
    InvalidInput(ValidationError),
    /// An operation needs an employee and none was chosen.
    NoEmployeeSelected,
    EmployeeNotFound(EmployeeId),
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::NoEmployeeSelected => write!(f, "no employee selected"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            RepoError::NotFound {
                entity: "employee",
                id,
            } => Self::EmployeeNotFound(id),
            RepoError::NotFound { entity: "task", id } => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}
