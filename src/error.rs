//! Error types for the schedule resolution engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during schedule resolution.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the schedule resolution engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use schedule_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     value: "9h30".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid clock time '9h30': expected HH:mm");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock time string was malformed or out of range.
    #[error("Invalid clock time '{value}': expected HH:mm")]
    InvalidTimeFormat {
        /// The value that failed to parse.
        value: String,
    },

    /// A time slot contained an invalid minute range.
    #[error("Invalid time slot: {message}")]
    InvalidSlot {
        /// A description of what made the slot invalid.
        message: String,
    },

    /// A work day pattern contained inconsistent slot data.
    #[error("Invalid work day pattern: {message}")]
    InvalidPattern {
        /// A description of what made the pattern invalid.
        message: String,
    },

    /// A schedule assignment was missing required configuration.
    #[error("Invalid schedule assignment: {message}")]
    InvalidAssignment {
        /// A description of what made the assignment invalid.
        message: String,
    },

    /// A record carried an inverted or otherwise impossible date range.
    #[error("Invalid date range: {message}")]
    InvalidDateRange {
        /// A description of the offending range.
        message: String,
    },

    /// The employee has no schedule assignment valid on the date.
    ///
    /// Non-fatal: callers surface this as "unscheduled".
    #[error("No active schedule assignment for employee '{employee_id}' on {date}")]
    NoActiveAssignment {
        /// The employee that was looked up.
        employee_id: String,
        /// The date for which no assignment was active.
        date: NaiveDate,
    },

    /// An assignment exists but no pattern covers the weekday or cycle index.
    ///
    /// Non-fatal: callers surface this as "unscheduled".
    #[error("No work day pattern for {date} (day index {day_index})")]
    NoPatternForDate {
        /// The date that could not be matched.
        date: NaiveDate,
        /// The computed weekday or rotation cycle index.
        day_index: u32,
    },

    /// An assignment referenced a template that does not exist.
    #[error("Schedule template not found: {template_id}")]
    TemplateNotFound {
        /// The template identifier that was not found.
        template_id: String,
    },

    /// A catalog file was not found at the specified path.
    #[error("Catalog file not found: {path}")]
    CatalogNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A catalog file could not be parsed.
    #[error("Failed to parse catalog file '{path}': {message}")]
    CatalogParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The data-access collaborator failed while fetching records.
    #[error("Data access failed: {message}")]
    DataAccess {
        /// A description of the underlying failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true if this error means "no schedule", not a real failure.
    ///
    /// Week-level and roster-level callers record these as unscheduled days
    /// instead of aborting the batch.
    pub fn is_unscheduled(&self) -> bool {
        matches!(
            self,
            EngineError::NoActiveAssignment { .. } | EngineError::NoPatternForDate { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
