//! Schedule period model.
//!
//! A [`SchedulePeriod`] overrides a template's base patterns within a date
//! range. Periods carry a category rank used by the period selector:
//! SPECIAL beats INTENSIVE beats REGULAR.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::pattern::{WorkDayPattern, pattern_for_day, validate_unique_day_indexes};

/// The category rank of a schedule period.
///
/// Declaration order defines precedence: `Special > Intensive > Regular`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PeriodCategory {
    /// Ordinary seasonal or contractual period.
    Regular,
    /// Compressed-hours period (e.g., summer intensive schedule).
    Intensive,
    /// One-off special period; always wins over the other categories.
    Special,
}

impl PeriodCategory {
    /// Returns the numeric rank, higher meaning stronger precedence.
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for PeriodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodCategory::Regular => write!(f, "regular"),
            PeriodCategory::Intensive => write!(f, "intensive"),
            PeriodCategory::Special => write!(f, "special"),
        }
    }
}

/// A time-bounded pattern override for a template.
///
/// Active within `[start_date, end_date]` inclusive; an absent `end_date`
/// means the period is open-ended. Carries its own pattern set, which fully
/// replaces the template's patterns while the period wins selection.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use schedule_engine::models::{PeriodCategory, SchedulePeriod};
///
/// let period = SchedulePeriod::new(
///     "summer_2026",
///     "office_standard",
///     PeriodCategory::Intensive,
///     NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
///     Some(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()),
///     Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap(),
///     vec![],
/// )
/// .unwrap();
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedulePeriod")]
pub struct SchedulePeriod {
    id: String,
    template_id: String,
    category: PeriodCategory,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    patterns: Vec<WorkDayPattern>,
}

/// Wire shape for [`SchedulePeriod`], validated on conversion.
#[derive(Deserialize)]
struct RawSchedulePeriod {
    id: String,
    template_id: String,
    category: PeriodCategory,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    patterns: Vec<WorkDayPattern>,
}

impl TryFrom<RawSchedulePeriod> for SchedulePeriod {
    type Error = EngineError;

    fn try_from(raw: RawSchedulePeriod) -> EngineResult<Self> {
        SchedulePeriod::new(
            raw.id,
            raw.template_id,
            raw.category,
            raw.start_date,
            raw.end_date,
            raw.created_at,
            raw.patterns,
        )
    }
}

impl SchedulePeriod {
    /// Creates a validated schedule period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] when the date range is
    /// inverted or two patterns cover the same day index.
    pub fn new(
        id: impl Into<String>,
        template_id: impl Into<String>,
        category: PeriodCategory,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
        patterns: Vec<WorkDayPattern>,
    ) -> EngineResult<Self> {
        let id = id.into();
        if let Some(end) = end_date {
            if end < start_date {
                return Err(EngineError::InvalidDateRange {
                    message: format!(
                        "period '{}' ends on {} before it starts on {}",
                        id, end, start_date
                    ),
                });
            }
        }
        validate_unique_day_indexes(&patterns, &format!("period '{}'", id))?;
        Ok(Self {
            id,
            template_id: template_id.into(),
            category,
            start_date,
            end_date,
            created_at,
            patterns,
        })
    }

    /// Returns the period identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the identifier of the template this period overrides.
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Returns the category rank of this period.
    pub fn category(&self) -> PeriodCategory {
        self.category
    }

    /// Returns the first active date.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last active date, or None when open-ended.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns when the period record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the period's own pattern set.
    pub fn patterns(&self) -> &[WorkDayPattern] {
        &self.patterns
    }

    /// Returns true if the period is active on the given date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Returns the inclusive span in days, or None when open-ended.
    ///
    /// A narrower span means a more specific period during selection.
    pub fn span_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    /// Returns the pattern for a weekday or cycle position, if registered.
    pub fn pattern_for_day(&self, day_index: u8) -> Option<&WorkDayPattern> {
        pattern_for_day(&self.patterns, day_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_period(id: &str, start: &str, end: Option<&str>) -> SchedulePeriod {
        SchedulePeriod::new(
            id,
            "office_standard",
            PeriodCategory::Regular,
            make_date(start),
            end.map(make_date),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            vec![],
        )
        .unwrap()
    }

    /// SP-001: category precedence order
    #[test]
    fn test_category_precedence() {
        assert!(PeriodCategory::Special > PeriodCategory::Intensive);
        assert!(PeriodCategory::Intensive > PeriodCategory::Regular);
        assert_eq!(PeriodCategory::Regular.rank(), 0);
        assert_eq!(PeriodCategory::Intensive.rank(), 1);
        assert_eq!(PeriodCategory::Special.rank(), 2);
    }

    /// SP-002: bounded period containment is inclusive on both ends
    #[test]
    fn test_bounded_containment() {
        let period = make_period("p", "2026-06-01", Some("2026-08-31"));
        assert!(period.contains(make_date("2026-06-01")));
        assert!(period.contains(make_date("2026-07-15")));
        assert!(period.contains(make_date("2026-08-31")));
        assert!(!period.contains(make_date("2026-05-31")));
        assert!(!period.contains(make_date("2026-09-01")));
    }

    /// SP-003: open-ended period contains every later date
    #[test]
    fn test_open_ended_containment() {
        let period = make_period("p", "2026-06-01", None);
        assert!(period.contains(make_date("2030-01-01")));
        assert!(!period.contains(make_date("2026-05-31")));
        assert_eq!(period.span_days(), None);
    }

    /// SP-004: span in days is inclusive
    #[test]
    fn test_span_days() {
        let period = make_period("p", "2026-07-13", Some("2026-07-17"));
        assert_eq!(period.span_days(), Some(5));

        let single = make_period("p", "2026-07-13", Some("2026-07-13"));
        assert_eq!(single.span_days(), Some(1));
    }

    /// SP-005: inverted date range is rejected
    #[test]
    fn test_inverted_range_rejected() {
        let result = SchedulePeriod::new(
            "p",
            "office_standard",
            PeriodCategory::Regular,
            make_date("2026-08-31"),
            Some(make_date("2026-06-01")),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&PeriodCategory::Special).unwrap(),
            "\"special\""
        );
        let category: PeriodCategory = serde_json::from_str("\"intensive\"").unwrap();
        assert_eq!(category, PeriodCategory::Intensive);
    }

    #[test]
    fn test_period_serialization_round_trip() {
        let period = make_period("summer", "2026-06-01", Some("2026-08-31"));
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: SchedulePeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
