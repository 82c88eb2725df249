//! Schedule assignment and employment contract models.
//!
//! A [`ScheduleAssignment`] binds an employee to a template within a
//! validity window; rotation assignments also carry the cycle anchor and
//! length. An [`EmploymentContract`] bounds the window an assignment may
//! occupy and is consumed by validation only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Binds an employee to a schedule template within a validity window.
///
/// `valid_to` of None means the assignment is open-ended. For templates of a
/// cyclic kind (shift/rotation) both `rotation_anchor` and `cycle_length`
/// must be present; the engine rejects cyclic resolution without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The employee this assignment belongs to.
    pub employee_id: String,
    /// The template the employee follows.
    pub template_id: String,
    /// First date the assignment is valid (inclusive).
    pub valid_from: NaiveDate,
    /// Last valid date (inclusive), or None when open-ended.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// Reference date at which the rotation cycle index is zero.
    #[serde(default)]
    pub rotation_anchor: Option<NaiveDate>,
    /// Number of days in the rotation cycle.
    #[serde(default)]
    pub cycle_length: Option<u32>,
}

impl ScheduleAssignment {
    /// Returns true if the assignment is valid on the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use schedule_engine::models::ScheduleAssignment;
    ///
    /// let assignment = ScheduleAssignment {
    ///     id: "asg_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     template_id: "office_standard".to_string(),
    ///     valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     valid_to: None,
    ///     rotation_anchor: None,
    ///     cycle_length: None,
    /// };
    /// assert!(assignment.is_active_on(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()));
    /// assert!(!assignment.is_active_on(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    /// ```
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.valid_from && self.valid_to.is_none_or(|end| date <= end)
    }
}

/// The active window of an employment contract.
///
/// Assignments must fall inside this window; the validation component
/// reports violations as CONTRACT_BOUNDS conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentContract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee the contract belongs to.
    pub employee_id: String,
    /// First day of the contract (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the contract (inclusive), or None when open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl EmploymentContract {
    /// Returns true if the given date falls inside the contract window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}
