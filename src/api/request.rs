//! Request types for the schedule resolution API.
//!
//! This module defines the JSON request structures for the `/resolve/day`,
//! `/resolve/week` and `/assignments/validate` endpoints. The catalog
//! (templates and periods) is server configuration; employee-specific
//! records travel in the request. Slot times cross the boundary as `HH:mm`
//! clock strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceKind, AbsenceRequest, EmploymentContract, ExceptionDayOverride,
    ManualShiftAssignment, ScheduleAssignment, SlotType, TimeSlot,
};
use crate::resolution::clock_to_minutes;

/// Request body for the `/resolve/day` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResolveRequest {
    /// The employee to resolve.
    pub employee_id: String,
    /// The local date to resolve.
    pub date: NaiveDate,
    /// The employee-specific records to resolve against.
    #[serde(flatten)]
    pub records: RecordSet,
}

/// Request body for the `/resolve/week` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekResolveRequest {
    /// The employee to resolve.
    pub employee_id: String,
    /// The first date of the week (Monday by convention).
    pub week_start: NaiveDate,
    /// The employee-specific records to resolve against.
    #[serde(flatten)]
    pub records: RecordSet,
}

/// Request body for the `/assignments/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateAssignmentRequest {
    /// The assignment candidate being checked.
    pub candidate: AssignmentRecord,
    /// The employment contract bounding the candidate.
    pub contract: ContractRecord,
    /// The employee's existing assignments.
    #[serde(default)]
    pub existing: Vec<AssignmentRecord>,
}

/// Employee-specific schedule records carried in a resolve request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    /// The employee's schedule assignments.
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
    /// Approved absences.
    #[serde(default)]
    pub absences: Vec<AbsenceRecord>,
    /// Exception-day overrides.
    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,
    /// Manual shift assignments.
    #[serde(default)]
    pub manual_shifts: Vec<ManualShiftRecord>,
    /// Slot identifiers designated as paid breaks by organization policy.
    #[serde(default)]
    pub paid_break_slot_ids: Vec<String>,
}

/// A schedule assignment in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The employee this assignment belongs to.
    pub employee_id: String,
    /// The template the employee follows.
    pub template_id: String,
    /// First valid date (inclusive).
    pub valid_from: NaiveDate,
    /// Last valid date (inclusive), absent when open-ended.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// Reference date at which the rotation cycle index is zero.
    #[serde(default)]
    pub rotation_anchor: Option<NaiveDate>,
    /// Number of days in the rotation cycle.
    #[serde(default)]
    pub cycle_length: Option<u32>,
}

impl From<AssignmentRecord> for ScheduleAssignment {
    fn from(record: AssignmentRecord) -> Self {
        ScheduleAssignment {
            id: record.id,
            employee_id: record.employee_id,
            template_id: record.template_id,
            valid_from: record.valid_from,
            valid_to: record.valid_to,
            rotation_anchor: record.rotation_anchor,
            cycle_length: record.cycle_length,
        }
    }
}

/// An employment contract in a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee the contract belongs to.
    pub employee_id: String,
    /// First day of the contract (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the contract (inclusive), absent when open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl From<ContractRecord> for EmploymentContract {
    fn from(record: ContractRecord) -> Self {
        EmploymentContract {
            id: record.id,
            employee_id: record.employee_id,
            start_date: record.start_date,
            end_date: record.end_date,
        }
    }
}

/// An approved absence in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Unique identifier for the absence.
    pub id: String,
    /// The employee the absence belongs to.
    pub employee_id: String,
    /// The kind of absence.
    pub kind: AbsenceKind,
    /// First covered date (inclusive).
    pub start_date: NaiveDate,
    /// Last covered date (inclusive).
    pub end_date: NaiveDate,
}

impl TryFrom<AbsenceRecord> for AbsenceRequest {
    type Error = EngineError;

    fn try_from(record: AbsenceRecord) -> EngineResult<Self> {
        AbsenceRequest::new(
            record.id,
            record.employee_id,
            record.kind,
            record.start_date,
            record.end_date,
        )
    }
}

/// An exception-day override in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Unique identifier for the override.
    pub id: String,
    /// The employee the override belongs to.
    pub employee_id: String,
    /// The date the override applies to.
    pub date: NaiveDate,
    /// Human-readable override label.
    pub label: String,
    /// Replacement slots; empty for a forced day off.
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
}

impl TryFrom<OverrideRecord> for ExceptionDayOverride {
    type Error = EngineError;

    fn try_from(record: OverrideRecord) -> EngineResult<Self> {
        let slots = convert_slots(record.slots)?;
        ExceptionDayOverride::new(
            record.id,
            record.employee_id,
            record.date,
            record.label,
            slots,
        )
    }
}

/// A manual shift assignment in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualShiftRecord {
    /// Unique identifier for the manual shift.
    pub id: String,
    /// The employee the manual shift belongs to.
    pub employee_id: String,
    /// The date the manual shift applies to.
    pub date: NaiveDate,
    /// The template the slots were taken from, if any.
    #[serde(default)]
    pub template_id: Option<String>,
    /// The assigned slots.
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
}

impl TryFrom<ManualShiftRecord> for ManualShiftAssignment {
    type Error = EngineError;

    fn try_from(record: ManualShiftRecord) -> EngineResult<Self> {
        let slots = convert_slots(record.slots)?;
        ManualShiftAssignment::new(
            record.id,
            record.employee_id,
            record.date,
            record.template_id,
            slots,
        )
    }
}

/// A time slot in a request, with `HH:mm` clock-string bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Unique identifier for the slot.
    pub id: String,
    /// Start of the slot as an `HH:mm` clock string.
    pub start: String,
    /// End of the slot as an `HH:mm` clock string (up to "24:00").
    pub end: String,
    /// Whether this interval is work or a break.
    pub slot_type: SlotType,
    /// Whether the interval counts toward worked hours; defaults by type.
    #[serde(default)]
    pub counts_as_work: Option<bool>,
}

impl TryFrom<SlotRecord> for TimeSlot {
    type Error = EngineError;

    fn try_from(record: SlotRecord) -> EngineResult<Self> {
        let start_minutes = clock_to_minutes(&record.start)?;
        let end_minutes = clock_to_minutes(&record.end)?;
        let counts_as_work = record
            .counts_as_work
            .unwrap_or(record.slot_type == SlotType::Work);
        TimeSlot::new(
            record.id,
            start_minutes,
            end_minutes,
            record.slot_type,
            counts_as_work,
        )
    }
}

/// Converts request slots, surfacing the first invalid one.
fn convert_slots(records: Vec<SlotRecord>) -> EngineResult<Vec<TimeSlot>> {
    records.into_iter().map(TimeSlot::try_from).collect()
}
