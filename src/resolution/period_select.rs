//! Period selection.
//!
//! Picks the schedule period that applies to a date when several overlap.
//! Precedence is category rank first (SPECIAL > INTENSIVE > REGULAR), then
//! range specificity (narrower inclusive day span wins, open-ended ranges
//! are least specific), then creation recency, and finally the
//! lexicographically smallest period identifier as the deterministic
//! tie-break.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::SchedulePeriod;

/// Orders two periods by selection precedence, strongest first.
///
/// Returns [`Ordering::Less`] when `a` should be selected ahead of `b`.
/// Total and deterministic: any two distinct period identifiers order.
fn precedence(a: &SchedulePeriod, b: &SchedulePeriod) -> Ordering {
    b.category()
        .cmp(&a.category())
        .then_with(|| {
            let a_span = a.span_days().unwrap_or(i64::MAX);
            let b_span = b.span_days().unwrap_or(i64::MAX);
            a_span.cmp(&b_span)
        })
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Selects the period active on the date with the strongest precedence.
///
/// Returns None when no period contains the date; the caller then falls
/// through to the template's base patterns.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use schedule_engine::models::{PeriodCategory, SchedulePeriod};
/// use schedule_engine::resolution::select_period;
///
/// let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let end = Some(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
/// let regular = SchedulePeriod::new(
///     "regular", "t", PeriodCategory::Regular, start, end, created, vec![],
/// ).unwrap();
/// let special = SchedulePeriod::new(
///     "special", "t", PeriodCategory::Special, start, end, created, vec![],
/// ).unwrap();
///
/// let periods = vec![regular, special];
/// let date = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
/// assert_eq!(select_period(&periods, date).unwrap().id(), "special");
/// ```
pub fn select_period(periods: &[SchedulePeriod], date: NaiveDate) -> Option<&SchedulePeriod> {
    periods
        .iter()
        .filter(|p| p.contains(date))
        .min_by(|a, b| precedence(a, b))
}
