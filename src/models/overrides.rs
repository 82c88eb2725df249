//! Day-level override models.
//!
//! An [`ExceptionDayOverride`] replaces the entire resolved schedule for one
//! employee on one date. A [`ManualShiftAssignment`] is an ad-hoc slot
//! assignment used in rotation and shift environments; it resolves above the
//! period layer but below exception-day overrides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::time_slot::{TimeSlot, sort_and_validate_slots};

/// A single-date override replacing the whole resolved schedule.
///
/// An empty slot list is a forced day off: the date resolves as not working
/// with override provenance.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::models::{ExceptionDayOverride, TimeSlot};
///
/// let override_day = ExceptionDayOverride::new(
///     "ovr_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
///     "Christmas Eve half day",
///     vec![TimeSlot::work("half_day", 540, 780).unwrap()],
/// )
/// .unwrap();
/// assert_eq!(override_day.slots().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExceptionDayOverride")]
pub struct ExceptionDayOverride {
    id: String,
    employee_id: String,
    date: NaiveDate,
    label: String,
    slots: Vec<TimeSlot>,
}

/// Wire shape for [`ExceptionDayOverride`], validated on conversion.
#[derive(Deserialize)]
struct RawExceptionDayOverride {
    id: String,
    employee_id: String,
    date: NaiveDate,
    label: String,
    #[serde(default)]
    slots: Vec<TimeSlot>,
}

impl TryFrom<RawExceptionDayOverride> for ExceptionDayOverride {
    type Error = EngineError;

    fn try_from(raw: RawExceptionDayOverride) -> EngineResult<Self> {
        ExceptionDayOverride::new(raw.id, raw.employee_id, raw.date, raw.label, raw.slots)
    }
}

impl ExceptionDayOverride {
    /// Creates a validated exception-day override.
    ///
    /// Slots are sorted by start minute; overlapping slots are rejected.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        label: impl Into<String>,
        slots: Vec<TimeSlot>,
    ) -> EngineResult<Self> {
        let id = id.into();
        let slots = sort_and_validate_slots(slots, &format!("override '{}'", id))?;
        Ok(Self {
            id,
            employee_id: employee_id.into(),
            date,
            label: label.into(),
            slots,
        })
    }

    /// Returns the override identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the employee this override belongs to.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the date the override applies to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the human-readable override label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the replacement slots, sorted by start minute.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}

/// An ad-hoc assignment of an employee to a slot set on a specific date.
///
/// Used in rotation and shift environments to place an employee outside
/// their regular cycle. Resolves after exception-day overrides and before
/// period selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawManualShiftAssignment")]
pub struct ManualShiftAssignment {
    id: String,
    employee_id: String,
    date: NaiveDate,
    template_id: Option<String>,
    slots: Vec<TimeSlot>,
}

/// Wire shape for [`ManualShiftAssignment`], validated on conversion.
#[derive(Deserialize)]
struct RawManualShiftAssignment {
    id: String,
    employee_id: String,
    date: NaiveDate,
    #[serde(default)]
    template_id: Option<String>,
    slots: Vec<TimeSlot>,
}

impl TryFrom<RawManualShiftAssignment> for ManualShiftAssignment {
    type Error = EngineError;

    fn try_from(raw: RawManualShiftAssignment) -> EngineResult<Self> {
        ManualShiftAssignment::new(
            raw.id,
            raw.employee_id,
            raw.date,
            raw.template_id,
            raw.slots,
        )
    }
}

impl ManualShiftAssignment {
    /// Creates a validated manual shift assignment.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        template_id: Option<String>,
        slots: Vec<TimeSlot>,
    ) -> EngineResult<Self> {
        let id = id.into();
        let slots = sort_and_validate_slots(slots, &format!("manual shift '{}'", id))?;
        Ok(Self {
            id,
            employee_id: employee_id.into(),
            date,
            template_id,
            slots,
        })
    }

    /// Returns the manual shift identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the employee this manual shift belongs to.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the date the manual shift applies to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the template the slots were taken from, if any.
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    /// Returns the assigned slots, sorted by start minute.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}
