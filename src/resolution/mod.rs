//! Schedule resolution logic.
//!
//! This module contains the full priority chain for computing effective
//! schedules: clock time helpers, weekday and rotation pattern matching,
//! period selection, override resolution, assignment validation, and the
//! [`ScheduleEngine`] orchestrator that composes them.

mod clock;
mod engine;
mod override_resolve;
mod pattern_match;
mod period_select;
mod validation;

pub use clock::{clock_to_minutes, format_range, minutes_to_clock};
pub use engine::ScheduleEngine;
pub use override_resolve::{OverrideResolution, resolve_override};
pub use pattern_match::{cycle_day_index, day_index_for, match_pattern, weekday_index};
pub use period_select::select_period;
pub use validation::{
    Conflict, ConflictKind, ValidationContext, ValidationResult, validate_assignment,
};

pub(crate) use clock::format_minute_range;
