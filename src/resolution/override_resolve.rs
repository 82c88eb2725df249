//! Override resolution.
//!
//! The top stages of the priority chain: an approved absence terminates
//! resolution with a not-working day, an exception-day override replaces the
//! whole schedule, and a manual shift assignment supplies ad-hoc slots ahead
//! of period selection. Each stage either returns a terminal result or lets
//! the orchestrator continue down the chain.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AbsenceRequest, ExceptionDayOverride, ManualShiftAssignment};
use crate::store::ScheduleStore;

/// The outcome of the override stages for one (employee, date).
#[derive(Debug, Clone)]
pub enum OverrideResolution {
    /// An approved absence covers the date; terminal, not working.
    Absence(AbsenceRequest),
    /// An exception-day override replaces the schedule; terminal.
    Exception(ExceptionDayOverride),
    /// A manual shift assignment supplies the slots; terminal.
    Manual(ManualShiftAssignment),
    /// No override applies; continue with period and template resolution.
    Continue,
}

/// Runs the override stages in priority order.
///
/// Consults the store for an absence first, then an exception-day override,
/// then a manual shift assignment. The first hit short-circuits all lower
/// layers.
///
/// # Errors
///
/// Propagates store failures unchanged.
pub fn resolve_override<S: ScheduleStore>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<OverrideResolution> {
    if let Some(absence) = store.absence(employee_id, date)? {
        return Ok(OverrideResolution::Absence(absence));
    }
    if let Some(override_day) = store.exception_override(employee_id, date)? {
        return Ok(OverrideResolution::Exception(override_day));
    }
    if let Some(manual) = store.manual_shift(employee_id, date)? {
        return Ok(OverrideResolution::Manual(manual));
    }
    Ok(OverrideResolution::Continue)
}
