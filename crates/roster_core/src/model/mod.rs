//! Domain model for the employee roster.
//!
//! # Responsibility
//! - Define canonical records for employees, tasks, attendance and activity.
//! - Own write-path validation shared by all repositories.
//!
//! # Invariants
//! - Entity ids are generated by storage and never reused.
//! - Tasks and attendance records are owned by exactly one employee.
//! - Activity rows reference employees/tasks loosely; stale ids are legal.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity;
pub mod attendance;
pub mod day;
pub mod employee;
pub mod task;

/// Storage-generated row identity.
pub type RowId = i64;

/// Write-path validation failures for domain records.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    BlankField(&'static str),
    /// Performance must be a finite value in `0.0..=1.0`.
    PerformanceOutOfRange(f64),
    /// Rating must be in `0..=5`.
    RatingOutOfRange(i64),
    /// Email is present but not shaped like `local@domain`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::PerformanceOutOfRange(value) => {
                write!(f, "performance must be within 0.0..=1.0, got {value}")
            }
            Self::RatingOutOfRange(value) => write!(f, "rating must be within 0..=5, got {value}"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}
