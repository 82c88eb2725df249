//! Absence request model.
//!
//! An approved absence removes the employee's work schedule entirely for
//! every date it covers. Absences are the top layer of the resolution chain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the kind of approved absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Annual leave / vacation.
    Vacation,
    /// Sick leave.
    SickLeave,
    /// Unpaid leave of absence.
    UnpaidLeave,
    /// Any other approved absence category.
    Other,
}

/// An approved absence covering an inclusive date range.
///
/// When an absence covers a date, resolution terminates with a NOT-WORKING
/// result regardless of any override, period or template configured for
/// that date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::models::{AbsenceKind, AbsenceRequest};
///
/// let vacation = AbsenceRequest::new(
///     "abs_001",
///     "emp_001",
///     AbsenceKind::Vacation,
///     NaiveDate::from_ymd_opt(2026, 7, 13).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 7, 17).unwrap(),
/// )
/// .unwrap();
/// assert!(vacation.covers(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAbsenceRequest")]
pub struct AbsenceRequest {
    id: String,
    employee_id: String,
    kind: AbsenceKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Wire shape for [`AbsenceRequest`], validated on conversion.
#[derive(Deserialize)]
struct RawAbsenceRequest {
    id: String,
    employee_id: String,
    kind: AbsenceKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawAbsenceRequest> for AbsenceRequest {
    type Error = EngineError;

    fn try_from(raw: RawAbsenceRequest) -> EngineResult<Self> {
        AbsenceRequest::new(
            raw.id,
            raw.employee_id,
            raw.kind,
            raw.start_date,
            raw.end_date,
        )
    }
}

impl AbsenceRequest {
    /// Creates a validated absence request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidAssignment`] when the range is inverted.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        kind: AbsenceKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<Self> {
        let id = id.into();
        if end_date < start_date {
            return Err(EngineError::InvalidDateRange {
                message: format!(
                    "absence '{}' ends on {} before it starts on {}",
                    id, end_date, start_date
                ),
            });
        }
        Ok(Self {
            id,
            employee_id: employee_id.into(),
            kind,
            start_date,
            end_date,
        })
    }

    /// Returns the absence identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the employee this absence belongs to.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the kind of absence.
    pub fn kind(&self) -> AbsenceKind {
        self.kind
    }

    /// Returns the first covered date.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last covered date (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true if the absence covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
