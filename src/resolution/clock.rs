//! Clock time helpers.
//!
//! This module converts between minute-of-day integers and `HH:mm` clock
//! strings and formats slot ranges for display. All functions are pure.

use crate::error::{EngineError, EngineResult};
use crate::models::{MINUTES_PER_DAY, TimeSlot};

/// Formats a minute-of-day value as an `HH:mm` clock string.
///
/// The exclusive day boundary 1440 is rendered as "24:00" so slot ends can
/// always be displayed.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeFormat`] when `minutes` is greater
/// than 1440.
///
/// # Example
///
/// ```
/// use schedule_engine::resolution::minutes_to_clock;
///
/// assert_eq!(minutes_to_clock(540).unwrap(), "09:00");
/// assert_eq!(minutes_to_clock(1440).unwrap(), "24:00");
/// assert!(minutes_to_clock(1441).is_err());
/// ```
pub fn minutes_to_clock(minutes: u16) -> EngineResult<String> {
    if minutes > MINUTES_PER_DAY {
        return Err(EngineError::InvalidTimeFormat {
            value: minutes.to_string(),
        });
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Parses an `HH:mm` clock string into a minute-of-day value.
///
/// Accepts "00:00" through "23:59", plus "24:00" for the exclusive day
/// boundary used by slot ends.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeFormat`] on any malformed or
/// out-of-range input.
///
/// # Example
///
/// ```
/// use schedule_engine::resolution::clock_to_minutes;
///
/// assert_eq!(clock_to_minutes("09:00").unwrap(), 540);
/// assert_eq!(clock_to_minutes("24:00").unwrap(), 1440);
/// assert!(clock_to_minutes("9:00").is_err());
/// assert!(clock_to_minutes("12:60").is_err());
/// ```
pub fn clock_to_minutes(text: &str) -> EngineResult<u16> {
    let invalid = || EngineError::InvalidTimeFormat {
        value: text.to_string(),
    };

    let (hours_part, minutes_part) = text.split_once(':').ok_or_else(invalid)?;
    if hours_part.len() != 2 || minutes_part.len() != 2 {
        return Err(invalid());
    }

    let hours: u16 = hours_part.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes_part.parse().map_err(|_| invalid())?;

    let total = hours * 60 + minutes;
    if minutes > 59 || total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Formats a minute range as "HH:mm–HH:mm".
///
/// Both bounds are known to be within `0..=1440`, so formatting cannot fail.
pub(crate) fn format_minute_range(start_minutes: u16, end_minutes: u16) -> String {
    format!(
        "{:02}:{:02}\u{2013}{:02}:{:02}",
        start_minutes / 60,
        start_minutes % 60,
        end_minutes / 60,
        end_minutes % 60
    )
}

/// Formats a slot's minute range as "HH:mm–HH:mm".
///
/// # Example
///
/// ```
/// use schedule_engine::models::TimeSlot;
/// use schedule_engine::resolution::format_range;
///
/// let slot = TimeSlot::work("am", 540, 780).unwrap();
/// assert_eq!(format_range(&slot), "09:00\u{2013}13:00");
/// ```
pub fn format_range(slot: &TimeSlot) -> String {
    format_minute_range(slot.start_minutes(), slot.end_minutes())
}
