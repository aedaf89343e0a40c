//! Repository layer contracts and SQLite persistence gateways.
//!
//! # Responsibility
//! - Define one data-access contract per roster entity.
//! - Isolate SQLite query details from services and aggregation.
//! - Own the attendance upsert decision.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Targeted updates on missing rows return `RepoError::NotFound`.
//! - Read paths reject undecodable persisted state instead of masking it.

use crate::db::DbError;
use crate::model::{RowId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity_repo;
pub mod attendance_repo;
pub mod employee_repo;
pub mod preference_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all roster gateways.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: RowId },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Db(err) => err.code(),
            Self::NotFound { .. } => "not_found",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn ensure_changed(changed: usize, entity: &'static str, id: RowId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}
