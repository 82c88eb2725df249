//! Core data models for the schedule resolution engine.
//!
//! This module contains all the domain value types used throughout the
//! engine. Every type with internal invariants validates them at
//! construction and on deserialization.

mod absence;
mod assignment;
mod effective;
mod overrides;
mod pattern;
mod period;
mod template;
mod time_slot;

pub use absence::{AbsenceKind, AbsenceRequest};
pub use assignment::{EmploymentContract, ScheduleAssignment};
pub use effective::{
    EffectiveSchedule, EffectiveTimeSlot, Provenance, ScheduleSource, UnscheduledReason,
    WeekSchedule,
};
pub use overrides::{ExceptionDayOverride, ManualShiftAssignment};
pub use pattern::{ScheduleKind, WorkDayPattern};
pub use period::{PeriodCategory, SchedulePeriod};
pub use template::ScheduleTemplate;
pub use time_slot::{MINUTES_PER_DAY, SlotType, TimeSlot};
