//! Pattern matching for dates.
//!
//! This module determines which [`WorkDayPattern`] of a pattern set applies
//! to a target date: by weekday for fixed and flexible schedules, by
//! rotation cycle position for shift and rotation schedules.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleAssignment, ScheduleKind, WorkDayPattern};

/// Returns the weekday index of a date, 0 = Monday through 6 = Sunday.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::resolution::weekday_index;
///
/// // 2026-01-12 is a Monday
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()), 0);
/// // 2026-01-18 is a Sunday
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()), 6);
/// ```
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Returns the rotation cycle position of a date relative to an anchor.
///
/// Uses floor-mod, so the result is well defined for dates before the
/// anchor: the cycle extends backward in time with the same period.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::resolution::cycle_day_index;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// assert_eq!(cycle_day_index(anchor, anchor, 4), 0);
/// assert_eq!(cycle_day_index(anchor, anchor.succ_opt().unwrap(), 4), 1);
/// // One full cycle before the anchor lands on position 0 again.
/// let before = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(cycle_day_index(anchor, before, 4), 0);
/// ```
pub fn cycle_day_index(anchor: NaiveDate, target: NaiveDate, cycle_length: u32) -> u32 {
    (target - anchor).num_days().rem_euclid(i64::from(cycle_length)) as u32
}

/// Computes the day index the assignment uses for a date.
///
/// Weekly kinds ignore the assignment's rotation fields; cyclic kinds
/// require both `rotation_anchor` and `cycle_length`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAssignment`] when a cyclic assignment is
/// missing its rotation configuration or has a zero cycle length.
pub fn day_index_for(
    kind: ScheduleKind,
    assignment: &ScheduleAssignment,
    date: NaiveDate,
) -> EngineResult<u32> {
    if !kind.is_cyclic() {
        return Ok(u32::from(weekday_index(date)));
    }
    let (anchor, cycle_length) = match (assignment.rotation_anchor, assignment.cycle_length) {
        (Some(anchor), Some(len)) if len > 0 => (anchor, len),
        _ => {
            return Err(EngineError::InvalidAssignment {
                message: format!(
                    "assignment '{}' follows a {} template but has no rotation anchor \
                     and positive cycle length",
                    assignment.id, kind
                ),
            });
        }
    };
    Ok(cycle_day_index(anchor, date, cycle_length))
}

/// Finds the pattern applying to a date within a pattern set.
///
/// # Errors
///
/// Returns [`EngineError::NoPatternForDate`] when no pattern is registered
/// for the computed weekday or cycle index. Callers treat this as "no
/// schedule", not as a user-facing failure.
pub fn match_pattern<'a>(
    kind: ScheduleKind,
    patterns: &'a [WorkDayPattern],
    assignment: &ScheduleAssignment,
    date: NaiveDate,
) -> EngineResult<&'a WorkDayPattern> {
    let day_index = day_index_for(kind, assignment, date)?;
    patterns
        .iter()
        .find(|p| u32::from(p.day_index()) == day_index)
        .ok_or(EngineError::NoPatternForDate { date, day_index })
}
