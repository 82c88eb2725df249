//! Schedule template model.
//!
//! A [`ScheduleTemplate`] is the named base schedule for a cost center or
//! role. It owns one [`WorkDayPattern`] per weekday or cycle position and is
//! the fallback layer of the resolution chain.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::pattern::{
    ScheduleKind, WorkDayPattern, pattern_for_day, validate_unique_day_indexes,
};

/// A named base schedule owning a set of work day patterns.
///
/// For weekly kinds every pattern's `day_index` must be a weekday (0-6).
/// For cyclic kinds the index space is the rotation cycle, whose length
/// lives on the employee's assignment rather than the template, so only
/// uniqueness is enforced here.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{ScheduleKind, ScheduleTemplate, TimeSlot, WorkDayPattern};
///
/// let template = ScheduleTemplate::new(
///     "office_standard",
///     "Office 9-18",
///     ScheduleKind::Fixed,
///     vec![WorkDayPattern::new(0, vec![TimeSlot::work("mon", 540, 1080).unwrap()]).unwrap()],
/// )
/// .unwrap();
/// assert!(template.pattern_for_day(0).is_some());
/// assert!(template.pattern_for_day(5).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScheduleTemplate")]
pub struct ScheduleTemplate {
    id: String,
    name: String,
    kind: ScheduleKind,
    patterns: Vec<WorkDayPattern>,
}

/// Wire shape for [`ScheduleTemplate`], validated on conversion.
#[derive(Deserialize)]
struct RawScheduleTemplate {
    id: String,
    name: String,
    kind: ScheduleKind,
    patterns: Vec<WorkDayPattern>,
}

impl TryFrom<RawScheduleTemplate> for ScheduleTemplate {
    type Error = EngineError;

    fn try_from(raw: RawScheduleTemplate) -> EngineResult<Self> {
        ScheduleTemplate::new(raw.id, raw.name, raw.kind, raw.patterns)
    }
}

impl ScheduleTemplate {
    /// Creates a validated schedule template.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] when two patterns cover the
    /// same day index, or when a weekly template carries a day index
    /// outside 0-6.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ScheduleKind,
        patterns: Vec<WorkDayPattern>,
    ) -> EngineResult<Self> {
        let id = id.into();
        let owner = format!("template '{}'", id);
        validate_unique_day_indexes(&patterns, &owner)?;
        if !kind.is_cyclic() {
            if let Some(p) = patterns.iter().find(|p| p.day_index() > 6) {
                return Err(EngineError::InvalidPattern {
                    message: format!(
                        "{}: day index {} is not a weekday (0-6)",
                        owner,
                        p.day_index()
                    ),
                });
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            patterns,
        })
    }

    /// Returns the template identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how this template's patterns are matched to dates.
    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    /// Returns all work day patterns.
    pub fn patterns(&self) -> &[WorkDayPattern] {
        &self.patterns
    }

    /// Returns the pattern for a weekday or cycle position, if registered.
    pub fn pattern_for_day(&self, day_index: u8) -> Option<&WorkDayPattern> {
        pattern_for_day(&self.patterns, day_index)
    }
}
