//! Work day pattern model and schedule kinds.
//!
//! A [`WorkDayPattern`] is the ordered slot sequence for one weekday or one
//! rotation cycle position. Patterns enforce the non-overlap invariant at
//! construction.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::time_slot::{TimeSlot, sort_and_validate_slots};

/// Represents how a template's patterns are matched to dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Fixed weekly schedule; patterns are keyed by weekday (0 = Monday).
    Fixed,
    /// Flexible weekly schedule; matched like [`ScheduleKind::Fixed`], slots
    /// describe the expected envelope rather than mandatory presence.
    Flexible,
    /// Shift work on a repeating cycle anchored to a reference date.
    Shift,
    /// Rotation on a repeating cycle anchored to a reference date.
    Rotation,
}

impl ScheduleKind {
    /// Returns true if patterns are keyed by rotation cycle index rather
    /// than by weekday.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, ScheduleKind::Shift | ScheduleKind::Rotation)
    }
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleKind::Fixed => write!(f, "fixed"),
            ScheduleKind::Flexible => write!(f, "flexible"),
            ScheduleKind::Shift => write!(f, "shift"),
            ScheduleKind::Rotation => write!(f, "rotation"),
        }
    }
}

/// The slot sequence for one day of a template or period.
///
/// `day_index` is the weekday for weekly kinds (0 = Monday through
/// 6 = Sunday) or the cycle position for rotations (0 through
/// cycle_length - 1). Slots are stored sorted by start minute and are
/// guaranteed not to overlap.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{TimeSlot, WorkDayPattern};
///
/// let pattern = WorkDayPattern::new(
///     0,
///     vec![
///         TimeSlot::work("am", 540, 780).unwrap(),
///         TimeSlot::unpaid_break("lunch", 780, 840).unwrap(),
///         TimeSlot::work("pm", 840, 1080).unwrap(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(pattern.scheduled_minutes(), 540);
/// assert_eq!(pattern.counted_minutes(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkDayPattern")]
pub struct WorkDayPattern {
    day_index: u8,
    slots: Vec<TimeSlot>,
}

/// Wire shape for [`WorkDayPattern`], validated on conversion.
#[derive(Deserialize)]
struct RawWorkDayPattern {
    day_index: u8,
    slots: Vec<TimeSlot>,
}

impl TryFrom<RawWorkDayPattern> for WorkDayPattern {
    type Error = EngineError;

    fn try_from(raw: RawWorkDayPattern) -> EngineResult<Self> {
        WorkDayPattern::new(raw.day_index, raw.slots)
    }
}

impl WorkDayPattern {
    /// Creates a validated work day pattern.
    ///
    /// Slots are sorted by start minute. Overlapping slots are rejected
    /// with [`EngineError::InvalidPattern`].
    pub fn new(day_index: u8, slots: Vec<TimeSlot>) -> EngineResult<Self> {
        let slots = sort_and_validate_slots(slots, &format!("day index {}", day_index))?;
        Ok(Self { day_index, slots })
    }

    /// Returns the weekday or cycle position this pattern covers.
    pub fn day_index(&self) -> u8 {
        self.day_index
    }

    /// Returns the slots, sorted by start minute.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
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
            .filter(|s| s.counts_as_work())
            .map(|s| u32::from(s.duration_minutes()))
            .sum()
    }
}

/// Finds the pattern covering a day index within a pattern set.
///
/// Pattern sets are small (at most seven entries for weekly kinds, one per
/// cycle position for rotations), so a linear scan is used.
pub(crate) fn pattern_for_day(patterns: &[WorkDayPattern], day_index: u8) -> Option<&WorkDayPattern> {
    patterns.iter().find(|p| p.day_index() == day_index)
}

/// Rejects pattern sets that cover the same day index twice.
pub(crate) fn validate_unique_day_indexes(
    patterns: &[WorkDayPattern],
    owner: &str,
) -> EngineResult<()> {
    for (i, pattern) in patterns.iter().enumerate() {
        if patterns[..i].iter().any(|p| p.day_index() == pattern.day_index()) {
            return Err(EngineError::InvalidPattern {
                message: format!(
                    "{}: day index {} is covered by more than one pattern",
                    owner,
                    pattern.day_index()
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office_slots() -> Vec<TimeSlot> {
        vec![
            TimeSlot::work("am", 540, 780).unwrap(),
            TimeSlot::unpaid_break("lunch", 780, 840).unwrap(),
            TimeSlot::work("pm", 840, 1080).unwrap(),
        ]
    }

    /// WP-001: pattern construction sorts slots
    #[test]
    fn test_pattern_sorts_slots() {
        let mut slots = office_slots();
        slots.reverse();
        let pattern = WorkDayPattern::new(0, slots).unwrap();
        let ids: Vec<&str> = pattern.slots().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["am", "lunch", "pm"]);
    }

    /// WP-002: overlapping slots are rejected
    #[test]
    fn test_pattern_rejects_overlap() {
        let slots = vec![
            TimeSlot::work("a", 540, 800).unwrap(),
            TimeSlot::work("b", 780, 900).unwrap(),
        ];
        assert!(WorkDayPattern::new(2, slots).is_err());
    }

    /// WP-003: scheduled and counted minute totals
    #[test]
    fn test_minute_totals() {
        let pattern = WorkDayPattern::new(0, office_slots()).unwrap();
        assert_eq!(pattern.scheduled_minutes(), 540);
        assert_eq!(pattern.counted_minutes(), 480);
    }

    /// WP-004: paid break counts toward counted minutes
    #[test]
    fn test_paid_break_counts() {
        let pattern = WorkDayPattern::new(
            0,
            vec![
                TimeSlot::work("am", 420, 780).unwrap(),
                TimeSlot::paid_break("rest", 780, 810).unwrap(),
                TimeSlot::work("pm", 810, 1140).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(pattern.scheduled_minutes(), 720);
        assert_eq!(pattern.counted_minutes(), 720);
    }

    #[test]
    fn test_empty_pattern_is_allowed() {
        // A registered day with zero slots is a valid "no hours" day.
        let pattern = WorkDayPattern::new(5, vec![]).unwrap();
        assert_eq!(pattern.scheduled_minutes(), 0);
        assert!(pattern.slots().is_empty());
    }

    #[test]
    fn test_pattern_for_day() {
        let patterns = vec![
            WorkDayPattern::new(0, office_slots()).unwrap(),
            WorkDayPattern::new(2, office_slots()).unwrap(),
        ];
        assert_eq!(pattern_for_day(&patterns, 2).unwrap().day_index(), 2);
        assert!(pattern_for_day(&patterns, 5).is_none());
    }

    #[test]
    fn test_validate_unique_day_indexes() {
        let patterns = vec![
            WorkDayPattern::new(0, vec![]).unwrap(),
            WorkDayPattern::new(0, vec![]).unwrap(),
        ];
        match validate_unique_day_indexes(&patterns, "template 'office'").unwrap_err() {
            EngineError::InvalidPattern { message } => {
                assert!(message.contains("template 'office'"));
                assert!(message.contains("day index 0"));
            }
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_kind_is_cyclic() {
        assert!(!ScheduleKind::Fixed.is_cyclic());
        assert!(!ScheduleKind::Flexible.is_cyclic());
        assert!(ScheduleKind::Shift.is_cyclic());
        assert!(ScheduleKind::Rotation.is_cyclic());
    }

    #[test]
    fn test_schedule_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ScheduleKind::Rotation).unwrap(),
            "\"rotation\""
        );
        let kind: ScheduleKind = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(kind, ScheduleKind::Fixed);
    }

    #[test]
    fn test_pattern_deserialization_rejects_overlap() {
        let json = r#"{
            "day_index": 0,
            "slots": [
                {"id": "a", "start_minutes": 540, "end_minutes": 800, "slot_type": "work"},
                {"id": "b", "start_minutes": 780, "end_minutes": 900, "slot_type": "work"}
            ]
        }"#;
        let result: Result<WorkDayPattern, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_pattern_serialization_round_trip() {
        let pattern = WorkDayPattern::new(3, office_slots()).unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        let deserialized: WorkDayPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, deserialized);
    }
}
