//! Employee aggregate root.
//!
//! # Invariants
//! - `id` is assigned by storage and immutable afterwards.
//! - `performance` stays within `0.0..=1.0`; `rating` within `0..=5`.

use crate::model::{RowId, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Employee identity.
pub type EmployeeId = RowId;

pub const MAX_RATING: i64 = 5;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Roster entry for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Zero until the row has been inserted.
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub department: String,
    pub phone_number: String,
    /// Normalized score, conventionally `0.0..=1.0`.
    pub performance: f64,
    /// Star rating, conventionally `0..=5`.
    pub rating: i64,
}

impl Employee {
    /// Creates an unsaved employee with zero performance and rating.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: String::new(),
            designation: String::new(),
            department: String::new(),
            phone_number: String::new(),
            performance: 0.0,
            rating: 0,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_performance(mut self, performance: f64) -> Self {
        self.performance = performance;
        self
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = rating;
        self
    }

    /// Validates write-path invariants.
    ///
    /// Email is optional; when present it must look like `local@domain.tld`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        validate_performance(self.performance)?;
        validate_rating(self.rating)
    }
}

/// Checks a performance score before a targeted update.
pub fn validate_performance(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::PerformanceOutOfRange(value))
    }
}

/// Checks a rating before a targeted update.
pub fn validate_rating(value: i64) -> Result<(), ValidationError> {
    if (0..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange(value))
    }
}
