//! Effective schedule output models.
//!
//! This module contains the [`EffectiveSchedule`] type and its associated
//! structures: the resolved slot list, the provenance record naming which
//! layer produced the result, and the week-level aggregation. These types
//! are built fresh on every resolution and never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::time_slot::{SlotType, TimeSlot};
use crate::resolution::format_minute_range;

/// The layer of the resolution chain that produced an effective schedule.
///
/// # Example
///
/// ```
/// use schedule_engine::models::ScheduleSource;
///
/// let source = ScheduleSource::Absence;
/// assert_eq!(serde_json::to_string(&source).unwrap(), "\"absence\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// An approved absence; the employee is not working.
    Absence,
    /// An exception-day override replaced the schedule.
    Override,
    /// An ad-hoc manual shift assignment supplied the slots.
    Manual,
    /// A schedule period's pattern set won selection.
    Period,
    /// The template's base patterns applied.
    Template,
    /// No layer produced a schedule for the date.
    Unscheduled,
}

impl std::fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleSource::Absence => write!(f, "absence"),
            ScheduleSource::Override => write!(f, "override"),
            ScheduleSource::Manual => write!(f, "manual"),
            ScheduleSource::Period => write!(f, "period"),
            ScheduleSource::Template => write!(f, "template"),
            ScheduleSource::Unscheduled => write!(f, "unscheduled"),
        }
    }
}

/// Why a date resolved as unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscheduledReason {
    /// No schedule assignment was valid on the date.
    NoAssignment,
    /// The assignment's pattern set does not cover the date.
    NoPattern,
    /// A record needed for resolution was malformed; the message names it.
    InvalidData {
        /// A description of the underlying data problem.
        message: String,
    },
}

/// Identifiers of the records that produced an effective schedule.
///
/// Kept for audit and debugging; only the fields of the winning layer are
/// populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// The template whose patterns applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// The period that won selection, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,
    /// The exception-day override that applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_id: Option<String>,
    /// The absence that terminated resolution, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absence_id: Option<String>,
    /// The manual shift assignment that applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_id: Option<String>,
}

impl Provenance {
    /// Provenance for an absence resolution.
    pub fn absence(absence_id: impl Into<String>) -> Self {
        Self {
            absence_id: Some(absence_id.into()),
            ..Self::default()
        }
    }

    /// Provenance for an exception-day override resolution.
    pub fn exception(override_id: impl Into<String>) -> Self {
        Self {
            override_id: Some(override_id.into()),
            ..Self::default()
        }
    }

    /// Provenance for a manual shift resolution.
    pub fn manual(manual_id: impl Into<String>) -> Self {
        Self {
            manual_id: Some(manual_id.into()),
            ..Self::default()
        }
    }

    /// Provenance for a period resolution.
    pub fn period(template_id: impl Into<String>, period_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            period_id: Some(period_id.into()),
            ..Self::default()
        }
    }

    /// Provenance for a template fallback resolution.
    pub fn template(template_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            ..Self::default()
        }
    }
}

/// A resolved slot in an effective schedule.
///
/// Mirrors the source [`TimeSlot`] with the paid-break cross-reference
/// already applied to `counts_as_work`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveTimeSlot {
    /// The identifier of the source slot.
    pub slot_id: String,
    /// Start of the range, minutes since local midnight.
    pub start_minutes: u16,
    /// Exclusive end of the range, up to 1440.
    pub end_minutes: u16,
    /// Whether this interval is work or a break.
    pub slot_type: SlotType,
    /// Whether the interval counts toward worked-hours totals.
    pub counts_as_work: bool,
}

impl EffectiveTimeSlot {
    /// Builds an effective slot from a source slot and its resolved
    /// counts-as-work flag.
    pub fn from_slot(slot: &TimeSlot, counts_as_work: bool) -> Self {
        Self {
            slot_id: slot.id().to_string(),
            start_minutes: slot.start_minutes(),
            end_minutes: slot.end_minutes(),
            slot_type: slot.slot_type(),
            counts_as_work,
        }
    }

    /// Returns the slot duration in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end_minutes - self.start_minutes
    }

    /// Returns the slot range as "HH:mm–HH:mm" for display.
    pub fn range_label(&self) -> String {
        format_minute_range(self.start_minutes, self.end_minutes)
    }
}

/// The resolved schedule for one employee on one date.
///
/// Built fresh on every query. `source` names the layer that produced the
/// result and `provenance` carries the record identifiers for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSchedule {
    /// The employee the schedule applies to.
    pub employee_id: String,
    /// The local date the schedule applies to.
    pub date: NaiveDate,
    /// The layer that produced this resolution.
    pub source: ScheduleSource,
    /// The resolved slots, sorted by start minute; empty when not working.
    pub slots: Vec<EffectiveTimeSlot>,
    /// Identifiers of the records that produced this resolution.
    #[serde(default)]
    pub provenance: Provenance,
    /// Why the date is unscheduled; only set when `source` is unscheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnscheduledReason>,
}

impl EffectiveSchedule {
    /// Builds a terminal not-working resolution from an absence.
    pub fn not_working(
        employee_id: impl Into<String>,
        date: NaiveDate,
        absence_id: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            source: ScheduleSource::Absence,
            slots: Vec::new(),
            provenance: Provenance::absence(absence_id),
            reason: None,
        }
    }

    /// Builds an unscheduled resolution with the reason attached.
    pub fn unscheduled(
        employee_id: impl Into<String>,
        date: NaiveDate,
        reason: UnscheduledReason,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            source: ScheduleSource::Unscheduled,
            slots: Vec::new(),
            provenance: Provenance::default(),
            reason: Some(reason),
        }
    }

    /// Returns the total scheduled minutes across all slots.
    pub fn scheduled_minutes(&self) -> u32 {
        self.slots
            .iter()
            .map(|s| u32::from(s.duration_minutes()))
            .sum()
    }

    /// Returns the minutes that count toward worked-hours totals.
    pub fn counted_minutes(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.counts_as_work)
            .map(|s| u32::from(s.duration_minutes()))
            .sum()
    }

    /// Returns the scheduled time as decimal hours.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use schedule_engine::models::{EffectiveSchedule, UnscheduledReason};
    ///
    /// let schedule = EffectiveSchedule::unscheduled(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
    ///     UnscheduledReason::NoPattern,
    /// );
    /// assert_eq!(schedule.scheduled_hours(), Decimal::ZERO);
    /// ```
    pub fn scheduled_hours(&self) -> Decimal {
        Decimal::from(self.scheduled_minutes()) / Decimal::new(60, 0)
    }

    /// Returns the counted time as decimal hours.
    pub fn counted_hours(&self) -> Decimal {
        Decimal::from(self.counted_minutes()) / Decimal::new(60, 0)
    }

    /// Returns true if the employee has at least one slot on this date.
    pub fn is_working(&self) -> bool {
        !self.slots.is_empty()
    }
}

/// Seven consecutive daily resolutions with aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// The employee the week belongs to.
    pub employee_id: String,
    /// The first date of the week (Monday by convention).
    pub week_start: NaiveDate,
    /// One resolution per day, in date order.
    pub days: Vec<EffectiveSchedule>,
    /// Sum of scheduled minutes across the week.
    pub total_scheduled_minutes: u32,
    /// Sum of counted minutes across the week.
    pub total_counted_minutes: u32,
}

impl WeekSchedule {
    /// Aggregates daily resolutions into a week schedule.
    pub fn from_days(
        employee_id: impl Into<String>,
        week_start: NaiveDate,
        days: Vec<EffectiveSchedule>,
    ) -> Self {
        let total_scheduled_minutes = days.iter().map(EffectiveSchedule::scheduled_minutes).sum();
        let total_counted_minutes = days.iter().map(EffectiveSchedule::counted_minutes).sum();
        Self {
            employee_id: employee_id.into(),
            week_start,
            days,
            total_scheduled_minutes,
            total_counted_minutes,
        }
    }

    /// Returns the total scheduled time as decimal hours.
    pub fn total_scheduled_hours(&self) -> Decimal {
        Decimal::from(self.total_scheduled_minutes) / Decimal::new(60, 0)
    }

    /// Returns the total counted time as decimal hours.
    pub fn total_counted_hours(&self) -> Decimal {
        Decimal::from(self.total_counted_minutes) / Decimal::new(60, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn office_day(date: &str) -> EffectiveSchedule {
        EffectiveSchedule {
            employee_id: "emp_001".to_string(),
            date: make_date(date),
            source: ScheduleSource::Template,
            slots: vec![
                EffectiveTimeSlot {
                    slot_id: "am".to_string(),
                    start_minutes: 540,
                    end_minutes: 780,
                    slot_type: SlotType::Work,
                    counts_as_work: true,
                },
                EffectiveTimeSlot {
                    slot_id: "lunch".to_string(),
                    start_minutes: 780,
                    end_minutes: 840,
                    slot_type: SlotType::Break,
                    counts_as_work: false,
                },
                EffectiveTimeSlot {
                    slot_id: "pm".to_string(),
                    start_minutes: 840,
                    end_minutes: 1080,
                    slot_type: SlotType::Work,
                    counts_as_work: true,
                },
            ],
            provenance: Provenance::template("office_standard"),
            reason: None,
        }
    }

    /// EF-001: scheduled and counted minute totals
    #[test]
    fn test_minute_totals() {
        let day = office_day("2026-01-14");
        assert_eq!(day.scheduled_minutes(), 540);
        assert_eq!(day.counted_minutes(), 480);
    }

    /// EF-002: decimal hour conversion
    #[test]
    fn test_decimal_hours() {
        let day = office_day("2026-01-14");
        assert_eq!(day.scheduled_hours(), Decimal::from_str("9").unwrap());
        assert_eq!(day.counted_hours(), Decimal::from_str("8").unwrap());
    }

    /// EF-003: not-working resolution carries absence provenance
    #[test]
    fn test_not_working_resolution() {
        let day = EffectiveSchedule::not_working("emp_001", make_date("2026-07-15"), "abs_001");
        assert_eq!(day.source, ScheduleSource::Absence);
        assert!(!day.is_working());
        assert_eq!(day.provenance.absence_id.as_deref(), Some("abs_001"));
        assert_eq!(day.provenance.template_id, None);
        assert_eq!(day.scheduled_minutes(), 0);
    }

    /// EF-004: unscheduled resolution carries its reason
    #[test]
    fn test_unscheduled_resolution() {
        let day = EffectiveSchedule::unscheduled(
            "emp_001",
            make_date("2026-01-17"),
            UnscheduledReason::NoPattern,
        );
        assert_eq!(day.source, ScheduleSource::Unscheduled);
        assert_eq!(day.reason, Some(UnscheduledReason::NoPattern));
    }

    /// EF-005: week totals equal the sum of the days
    #[test]
    fn test_week_totals() {
        let days = vec![
            office_day("2026-01-12"),
            office_day("2026-01-13"),
            office_day("2026-01-14"),
            office_day("2026-01-15"),
            office_day("2026-01-16"),
            EffectiveSchedule::unscheduled(
                "emp_001",
                make_date("2026-01-17"),
                UnscheduledReason::NoPattern,
            ),
            EffectiveSchedule::unscheduled(
                "emp_001",
                make_date("2026-01-18"),
                UnscheduledReason::NoPattern,
            ),
        ];
        let daily_sum: u32 = days.iter().map(EffectiveSchedule::scheduled_minutes).sum();
        let week = WeekSchedule::from_days("emp_001", make_date("2026-01-12"), days);

        assert_eq!(week.total_scheduled_minutes, daily_sum);
        assert_eq!(week.total_scheduled_minutes, 2700);
        assert_eq!(week.total_counted_minutes, 2400);
        assert_eq!(week.total_scheduled_hours(), Decimal::from_str("45").unwrap());
        assert_eq!(week.total_counted_hours(), Decimal::from_str("40").unwrap());
    }

    #[test]
    fn test_effective_slot_range_label() {
        let slot = EffectiveTimeSlot {
            slot_id: "am".to_string(),
            start_minutes: 540,
            end_minutes: 780,
            slot_type: SlotType::Work,
            counts_as_work: true,
        };
        assert_eq!(slot.range_label(), "09:00\u{2013}13:00");
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&ScheduleSource::Unscheduled).unwrap(),
            "\"unscheduled\""
        );
        let source: ScheduleSource = serde_json::from_str("\"period\"").unwrap();
        assert_eq!(source, ScheduleSource::Period);
    }

    #[test]
    fn test_provenance_skips_absent_fields() {
        let day = EffectiveSchedule::not_working("emp_001", make_date("2026-07-15"), "abs_001");
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"absence_id\":\"abs_001\""));
        assert!(!json.contains("template_id"));
        assert!(!json.contains("period_id"));
    }

    #[test]
    fn test_schedule_serialization_round_trip() {
        let day = office_day("2026-01-14");
        let json = serde_json::to_string(&day).unwrap();
        let deserialized: EffectiveSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(day, deserialized);
    }
}
