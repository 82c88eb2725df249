//! Read-only data access for the resolution engine.
//!
//! The engine never queries a database directly: it reads pre-scoped record
//! sets through the [`ScheduleStore`] trait. Mutation and write serialization
//! live entirely in the surrounding system. [`InMemoryStore`] backs tests,
//! benchmarks and the stateless HTTP surface.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AbsenceRequest, ExceptionDayOverride, ManualShiftAssignment, ScheduleAssignment,
    SchedulePeriod, ScheduleTemplate,
};

/// A template together with the periods bound to it.
#[derive(Debug, Clone)]
pub struct TemplateRecord {
    /// The base template.
    pub template: ScheduleTemplate,
    /// All periods overriding this template, in no particular order.
    pub periods: Vec<SchedulePeriod>,
}

/// Read-only access to schedule records, pre-scoped to one tenant.
///
/// All methods return a snapshot of the records at call time; the engine
/// performs no caching across calls. Implementations backed by real I/O
/// surface failures as [`EngineError::DataAccess`], which the engine
/// propagates without retrying.
pub trait ScheduleStore {
    /// Returns the assignment valid for the employee on the date, if any.
    ///
    /// When several assignments overlap the date (a data fault the
    /// validation component exists to prevent), implementations should
    /// return the one with the latest `valid_from`.
    fn active_assignment(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ScheduleAssignment>>;

    /// Returns the template and its periods, or None when unknown.
    fn template(&self, template_id: &str) -> EngineResult<Option<TemplateRecord>>;

    /// Returns an approved absence covering the employee on the date.
    fn absence(&self, employee_id: &str, date: NaiveDate)
    -> EngineResult<Option<AbsenceRequest>>;

    /// Returns the exception-day override for the exact date, if any.
    fn exception_override(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ExceptionDayOverride>>;

    /// Returns the manual shift assignment for the exact date, if any.
    fn manual_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ManualShiftAssignment>>;

    /// Filters the given slot identifiers down to those designated as paid
    /// breaks by organization policy.
    fn paid_break_slot_ids(&self, slot_ids: &[String]) -> EngineResult<HashSet<String>>;
}

/// An in-memory [`ScheduleStore`] over plain record collections.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::models::{ScheduleAssignment, ScheduleKind, ScheduleTemplate};
/// use schedule_engine::store::{InMemoryStore, ScheduleStore};
///
/// let mut store = InMemoryStore::new();
/// store.add_template(
///     ScheduleTemplate::new("office", "Office", ScheduleKind::Fixed, vec![]).unwrap(),
/// );
/// store.add_assignment(ScheduleAssignment {
///     id: "asg_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     template_id: "office".to_string(),
///     valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     valid_to: None,
///     rotation_anchor: None,
///     cycle_length: None,
/// });
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// assert!(store.active_assignment("emp_001", date).unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    templates: HashMap<String, ScheduleTemplate>,
    periods: HashMap<String, Vec<SchedulePeriod>>,
    assignments: Vec<ScheduleAssignment>,
    absences: Vec<AbsenceRequest>,
    overrides: Vec<ExceptionDayOverride>,
    manual_shifts: Vec<ManualShiftAssignment>,
    paid_break_ids: HashSet<String>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template.
    pub fn add_template(&mut self, template: ScheduleTemplate) {
        self.templates.insert(template.id().to_string(), template);
    }

    /// Registers a period under its template.
    pub fn add_period(&mut self, period: SchedulePeriod) {
        self.periods
            .entry(period.template_id().to_string())
            .or_default()
            .push(period);
    }

    /// Registers a schedule assignment.
    pub fn add_assignment(&mut self, assignment: ScheduleAssignment) {
        self.assignments.push(assignment);
    }

    /// Registers an approved absence.
    pub fn add_absence(&mut self, absence: AbsenceRequest) {
        self.absences.push(absence);
    }

    /// Registers an exception-day override.
    pub fn add_override(&mut self, override_day: ExceptionDayOverride) {
        self.overrides.push(override_day);
    }

    /// Registers a manual shift assignment.
    pub fn add_manual_shift(&mut self, manual: ManualShiftAssignment) {
        self.manual_shifts.push(manual);
    }

    /// Marks a slot identifier as a paid break under organization policy.
    pub fn add_paid_break_slot_id(&mut self, slot_id: impl Into<String>) {
        self.paid_break_ids.insert(slot_id.into());
    }
}

impl ScheduleStore for InMemoryStore {
    fn active_assignment(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ScheduleAssignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee_id && a.is_active_on(date))
            .max_by_key(|a| a.valid_from)
            .cloned())
    }

    fn template(&self, template_id: &str) -> EngineResult<Option<TemplateRecord>> {
        Ok(self.templates.get(template_id).map(|template| {
            TemplateRecord {
                template: template.clone(),
                periods: self.periods.get(template_id).cloned().unwrap_or_default(),
            }
        }))
    }

    fn absence(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<AbsenceRequest>> {
        Ok(self
            .absences
            .iter()
            .find(|a| a.employee_id() == employee_id && a.covers(date))
            .cloned())
    }

    fn exception_override(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ExceptionDayOverride>> {
        Ok(self
            .overrides
            .iter()
            .find(|o| o.employee_id() == employee_id && o.date() == date)
            .cloned())
    }

    fn manual_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ManualShiftAssignment>> {
        Ok(self
            .manual_shifts
            .iter()
            .find(|m| m.employee_id() == employee_id && m.date() == date)
            .cloned())
    }

    fn paid_break_slot_ids(&self, slot_ids: &[String]) -> EngineResult<HashSet<String>> {
        Ok(slot_ids
            .iter()
            .filter(|id| self.paid_break_ids.contains(*id))
            .cloned()
            .collect())
    }
}

/// A store wrapper that fails every call, for exercising I/O error paths.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
use crate::error::EngineError;

#[cfg(test)]
impl ScheduleStore for FailingStore {
    fn active_assignment(
        &self,
        _employee_id: &str,
        _date: NaiveDate,
    ) -> EngineResult<Option<ScheduleAssignment>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }

    fn template(&self, _template_id: &str) -> EngineResult<Option<TemplateRecord>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }

    fn absence(
        &self,
        _employee_id: &str,
        _date: NaiveDate,
    ) -> EngineResult<Option<AbsenceRequest>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }

    fn exception_override(
        &self,
        _employee_id: &str,
        _date: NaiveDate,
    ) -> EngineResult<Option<ExceptionDayOverride>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }

    fn manual_shift(
        &self,
        _employee_id: &str,
        _date: NaiveDate,
    ) -> EngineResult<Option<ManualShiftAssignment>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }

    fn paid_break_slot_ids(&self, _slot_ids: &[String]) -> EngineResult<HashSet<String>> {
        Err(EngineError::DataAccess {
            message: "connection reset".to_string(),
        })
    }
}
