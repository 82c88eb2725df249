//! The schedule resolution orchestrator.
//!
//! [`ScheduleEngine`] composes the override resolver, the period selector
//! and the pattern matcher into a single effective-schedule resolution per
//! (employee, date), plus the week-level aggregation. The engine is
//! stateless: every resolution is a pure read-then-compute pass over the
//! records the store returns at call time.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EffectiveSchedule, EffectiveTimeSlot, Provenance, ScheduleAssignment, ScheduleSource,
    SlotType, TimeSlot, UnscheduledReason, WeekSchedule,
};
use crate::resolution::override_resolve::{OverrideResolution, resolve_override};
use crate::resolution::pattern_match::match_pattern;
use crate::resolution::period_select::select_period;
use crate::resolution::validation::{ValidationContext, ValidationResult, validate_assignment};
use crate::store::ScheduleStore;

/// Resolves effective schedules against a read-only record store.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::resolution::ScheduleEngine;
/// use schedule_engine::store::InMemoryStore;
///
/// let engine = ScheduleEngine::new(InMemoryStore::new());
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// // No records registered: resolution reports the employee as unassigned.
/// assert!(engine.resolve_effective_schedule("emp_001", date).is_err());
/// ```
pub struct ScheduleEngine<S> {
    store: S,
}

impl<S: ScheduleStore> ScheduleEngine<S> {
    /// Creates an engine over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the effective schedule for one employee on one date.
    ///
    /// Walks the priority chain: active assignment lookup, then absence,
    /// exception-day override and manual shift (each terminal when present),
    /// then period selection over the assignment's template, then pattern
    /// matching for the date.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoActiveAssignment`] when no assignment is valid on
    ///   the date (callers render "unscheduled")
    /// - [`EngineError::NoPatternForDate`] when the winning pattern set does
    ///   not cover the date's weekday or cycle position (same treatment)
    /// - [`EngineError::TemplateNotFound`] when the assignment references a
    ///   template the store does not know
    /// - any store failure, unchanged
    pub fn resolve_effective_schedule(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<EffectiveSchedule> {
        let assignment = self.store.active_assignment(employee_id, date)?.ok_or_else(|| {
            EngineError::NoActiveAssignment {
                employee_id: employee_id.to_string(),
                date,
            }
        })?;

        match resolve_override(&self.store, employee_id, date)? {
            OverrideResolution::Absence(absence) => {
                debug!(employee_id, %date, absence_id = absence.id(), "resolved as absence");
                return Ok(EffectiveSchedule::not_working(employee_id, date, absence.id()));
            }
            OverrideResolution::Exception(override_day) => {
                debug!(employee_id, %date, override_id = override_day.id(), "resolved from override");
                return Ok(EffectiveSchedule {
                    employee_id: employee_id.to_string(),
                    date,
                    source: ScheduleSource::Override,
                    slots: self.attach_counts_as_work(override_day.slots())?,
                    provenance: Provenance::exception(override_day.id()),
                    reason: None,
                });
            }
            OverrideResolution::Manual(manual) => {
                debug!(employee_id, %date, manual_id = manual.id(), "resolved from manual shift");
                return Ok(EffectiveSchedule {
                    employee_id: employee_id.to_string(),
                    date,
                    source: ScheduleSource::Manual,
                    slots: self.attach_counts_as_work(manual.slots())?,
                    provenance: Provenance::manual(manual.id()),
                    reason: None,
                });
            }
            OverrideResolution::Continue => {}
        }

        let record = self.store.template(&assignment.template_id)?.ok_or_else(|| {
            EngineError::TemplateNotFound {
                template_id: assignment.template_id.clone(),
            }
        })?;

        let kind = record.template.kind();
        let (patterns, source, provenance) = match select_period(&record.periods, date) {
            Some(period) => (
                period.patterns(),
                ScheduleSource::Period,
                Provenance::period(record.template.id(), period.id()),
            ),
            None => (
                record.template.patterns(),
                ScheduleSource::Template,
                Provenance::template(record.template.id()),
            ),
        };

        let pattern = match_pattern(kind, patterns, &assignment, date)?;
        let slots = self.attach_counts_as_work(pattern.slots())?;

        debug!(
            employee_id,
            %date,
            source = %source,
            slot_count = slots.len(),
            "resolved effective schedule"
        );
        Ok(EffectiveSchedule {
            employee_id: employee_id.to_string(),
            date,
            source,
            slots,
            provenance,
            reason: None,
        })
    }

    /// Resolves a date, mapping per-record failures to unscheduled days.
    ///
    /// Store (I/O) failures still propagate; everything else becomes an
    /// [`EffectiveSchedule`] with source unscheduled and the reason
    /// attached. This is the mapping batch callers use so one bad day never
    /// aborts a week or roster run.
    pub fn resolve_or_unscheduled(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<EffectiveSchedule> {
        match self.resolve_effective_schedule(employee_id, date) {
            Ok(schedule) => Ok(schedule),
            Err(EngineError::NoActiveAssignment { .. }) => Ok(EffectiveSchedule::unscheduled(
                employee_id,
                date,
                UnscheduledReason::NoAssignment,
            )),
            Err(EngineError::NoPatternForDate { .. }) => Ok(EffectiveSchedule::unscheduled(
                employee_id,
                date,
                UnscheduledReason::NoPattern,
            )),
            Err(err @ EngineError::DataAccess { .. }) => Err(err),
            Err(err) => Ok(EffectiveSchedule::unscheduled(
                employee_id,
                date,
                UnscheduledReason::InvalidData {
                    message: err.to_string(),
                },
            )),
        }
    }

    /// Resolves the seven dates starting at `week_start` (Monday by
    /// convention) and aggregates the totals.
    ///
    /// A day with no assignment or no pattern is recorded as unscheduled
    /// within the week rather than failing the whole call; only store
    /// failures abort.
    pub fn resolve_week_schedule(
        &self,
        employee_id: &str,
        week_start: NaiveDate,
    ) -> EngineResult<WeekSchedule> {
        let mut days = Vec::with_capacity(7);
        for offset in 0..7 {
            let date = week_start + Duration::days(offset);
            days.push(self.resolve_or_unscheduled(employee_id, date)?);
        }
        Ok(WeekSchedule::from_days(employee_id, week_start, days))
    }

    /// Validates an assignment candidate against existing records.
    ///
    /// Thin forwarding to [`validate_assignment`]; kept on the engine so
    /// callers have one entry point for all schedule operations.
    pub fn validate_assignment(
        &self,
        candidate: &ScheduleAssignment,
        context: &ValidationContext,
    ) -> ValidationResult {
        validate_assignment(candidate, context)
    }

    /// Builds effective slots with the paid-break cross-reference applied.
    ///
    /// Break slots designated as paid by organization policy count toward
    /// worked hours even when the slot itself says otherwise; a slot's own
    /// `counts_as_work` flag is never downgraded.
    fn attach_counts_as_work(&self, slots: &[TimeSlot]) -> EngineResult<Vec<EffectiveTimeSlot>> {
        let break_ids: Vec<String> = slots
            .iter()
            .filter(|s| s.slot_type() == SlotType::Break)
            .map(|s| s.id().to_string())
            .collect();
        let paid_break_ids = if break_ids.is_empty() {
            Default::default()
        } else {
            self.store.paid_break_slot_ids(&break_ids)?
        };

        Ok(slots
            .iter()
            .map(|slot| {
                let counts = slot.counts_as_work()
                    || (slot.slot_type() == SlotType::Break && paid_break_ids.contains(slot.id()));
                EffectiveTimeSlot::from_slot(slot, counts)
            })
            .collect())
    }
}
