//! Time slot model and related types.
//!
//! This module defines the [`TimeSlot`] struct, the atomic unit of a work day
//! pattern. Slots are expressed in minutes since local midnight and validated
//! at construction, so malformed ranges never enter the resolution engine.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The number of minutes in a calendar day.
///
/// A slot's `end_minutes` may equal this value (exclusive upper bound,
/// rendered as "24:00"). A slot never crosses midnight: overnight work is
/// represented as two slots on consecutive days.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Represents the kind of interval a time slot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    /// A working interval.
    Work,
    /// A break interval (may still count toward worked hours if paid).
    Break,
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotType::Work => write!(f, "work"),
            SlotType::Break => write!(f, "break"),
        }
    }
}

/// A contiguous minute range `[start_minutes, end_minutes)` within one day.
///
/// Invariants enforced at construction:
/// - `end_minutes > start_minutes`
/// - `start_minutes < 1440` and `end_minutes <= 1440`
///
/// Deserialization goes through the same validation, so a `TimeSlot` obtained
/// from JSON or YAML carries the same guarantees as one built in code.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{SlotType, TimeSlot};
///
/// let slot = TimeSlot::new("office_am", 540, 780, SlotType::Work, true).unwrap();
/// assert_eq!(slot.duration_minutes(), 240);
/// assert!(TimeSlot::new("bad", 780, 540, SlotType::Work, true).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    id: String,
    start_minutes: u16,
    end_minutes: u16,
    slot_type: SlotType,
    counts_as_work: bool,
}

/// Wire shape for [`TimeSlot`], validated on conversion.
#[derive(Deserialize)]
struct RawTimeSlot {
    id: String,
    start_minutes: u16,
    end_minutes: u16,
    slot_type: SlotType,
    #[serde(default)]
    counts_as_work: Option<bool>,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = EngineError;

    fn try_from(raw: RawTimeSlot) -> EngineResult<Self> {
        let counts_as_work = raw
            .counts_as_work
            .unwrap_or(raw.slot_type == SlotType::Work);
        TimeSlot::new(
            raw.id,
            raw.start_minutes,
            raw.end_minutes,
            raw.slot_type,
            counts_as_work,
        )
    }
}

impl TimeSlot {
    /// Creates a validated time slot.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for the slot within its catalog
    /// * `start_minutes` - Start of the range, minutes since local midnight
    /// * `end_minutes` - Exclusive end of the range, up to 1440
    /// * `slot_type` - Whether this interval is work or a break
    /// * `counts_as_work` - Whether the interval counts toward worked hours
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSlot`] when `end_minutes <= start_minutes`
    /// or the range leaves the `0..=1440` minute window.
    pub fn new(
        id: impl Into<String>,
        start_minutes: u16,
        end_minutes: u16,
        slot_type: SlotType,
        counts_as_work: bool,
    ) -> EngineResult<Self> {
        let id = id.into();
        if end_minutes <= start_minutes {
            return Err(EngineError::InvalidSlot {
                message: format!(
                    "slot '{}' ends at minute {} which is not after its start at minute {}",
                    id, end_minutes, start_minutes
                ),
            });
        }
        if start_minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidSlot {
                message: format!(
                    "slot '{}' starts at minute {} which is outside the day (0-1439)",
                    id, start_minutes
                ),
            });
        }
        if end_minutes > MINUTES_PER_DAY {
            return Err(EngineError::InvalidSlot {
                message: format!(
                    "slot '{}' ends at minute {} past midnight; overnight work must be \
                     represented as a second slot on the following day",
                    id, end_minutes
                ),
            });
        }
        Ok(Self {
            id,
            start_minutes,
            end_minutes,
            slot_type,
            counts_as_work,
        })
    }

    /// Creates a work slot that counts toward worked hours.
    pub fn work(id: impl Into<String>, start_minutes: u16, end_minutes: u16) -> EngineResult<Self> {
        Self::new(id, start_minutes, end_minutes, SlotType::Work, true)
    }

    /// Creates an unpaid break slot.
    pub fn unpaid_break(
        id: impl Into<String>,
        start_minutes: u16,
        end_minutes: u16,
    ) -> EngineResult<Self> {
        Self::new(id, start_minutes, end_minutes, SlotType::Break, false)
    }

    /// Creates a paid break slot that counts toward worked hours.
    pub fn paid_break(
        id: impl Into<String>,
        start_minutes: u16,
        end_minutes: u16,
    ) -> EngineResult<Self> {
        Self::new(id, start_minutes, end_minutes, SlotType::Break, true)
    }

    /// Returns the slot identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the start of the range in minutes since local midnight.
    pub fn start_minutes(&self) -> u16 {
        self.start_minutes
    }

    /// Returns the exclusive end of the range in minutes since local midnight.
    pub fn end_minutes(&self) -> u16 {
        self.end_minutes
    }

    /// Returns whether this interval is work or a break.
    pub fn slot_type(&self) -> SlotType {
        self.slot_type
    }

    /// Returns whether the interval counts toward worked-hours totals.
    pub fn counts_as_work(&self) -> bool {
        self.counts_as_work
    }

    /// Returns the slot duration in minutes, always positive by invariant.
    pub fn duration_minutes(&self) -> u16 {
        self.end_minutes - self.start_minutes
    }

    /// Returns true if the minute ranges of the two slots intersect.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }
}

/// Sorts slots by start minute and rejects overlapping ranges.
///
/// Shared by every type that owns a slot sequence for one day. The `owner`
/// string names the containing pattern or override in the error message.
pub(crate) fn sort_and_validate_slots(
    mut slots: Vec<TimeSlot>,
    owner: &str,
) -> EngineResult<Vec<TimeSlot>> {
    slots.sort_by_key(|s| (s.start_minutes, s.end_minutes));
    for pair in slots.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(EngineError::InvalidPattern {
                message: format!(
                    "{}: slots '{}' and '{}' overlap",
                    owner,
                    pair[0].id(),
                    pair[1].id()
                ),
            });
        }
    }
    Ok(slots)
}
