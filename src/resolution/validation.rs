//! Assignment validation.
//!
//! Checks a proposed schedule assignment against an employee's existing
//! assignments and employment contract before it takes effect. Conflicts
//! are returned as structured data, never thrown, so callers can surface
//! every problem at once. The authoritative overlap guarantee lives in the
//! persistence layer; this check is advisory.

use serde::{Deserialize, Serialize};

use crate::models::{EmploymentContract, ScheduleAssignment};

/// The kind of conflict found while validating an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The candidate's validity window overlaps an existing assignment.
    AssignmentOverlap,
    /// The candidate's validity window leaves the employment contract.
    ContractBounds,
}

/// A single conflict found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The kind of conflict.
    pub kind: ConflictKind,
    /// A human-readable description of the conflict.
    pub message: String,
    /// The identifier of the conflicting record, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_id: Option<String>,
}

/// The outcome of validating an assignment candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no conflicts were found.
    pub valid: bool,
    /// Every conflict found, in detection order.
    pub conflicts: Vec<Conflict>,
}

impl ValidationResult {
    /// Builds the result from the collected conflicts.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            valid: conflicts.is_empty(),
            conflicts,
        }
    }
}

/// The records an assignment candidate is validated against.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// The employment contract that bounds the candidate.
    pub contract: EmploymentContract,
    /// The employee's existing assignments.
    pub existing: Vec<ScheduleAssignment>,
}

/// Returns true if two inclusive, possibly open-ended ranges intersect.
fn windows_overlap(
    a_from: chrono::NaiveDate,
    a_to: Option<chrono::NaiveDate>,
    b_from: chrono::NaiveDate,
    b_to: Option<chrono::NaiveDate>,
) -> bool {
    a_to.is_none_or(|end| b_from <= end) && b_to.is_none_or(|end| a_from <= end)
}

/// Validates an assignment candidate against existing records.
///
/// Collects every conflict instead of stopping at the first:
/// - [`ConflictKind::AssignmentOverlap`] for each existing assignment of the
///   same employee whose validity window intersects the candidate's. The
///   candidate's own identifier is skipped so updates validate cleanly.
/// - [`ConflictKind::ContractBounds`] when the candidate's window is not
///   fully inside the employment contract's active window.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::models::{EmploymentContract, ScheduleAssignment};
/// use schedule_engine::resolution::{validate_assignment, ValidationContext};
///
/// let candidate = ScheduleAssignment {
///     id: "asg_new".to_string(),
///     employee_id: "emp_001".to_string(),
///     template_id: "office_standard".to_string(),
///     valid_from: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     valid_to: Some(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()),
///     rotation_anchor: None,
///     cycle_length: None,
/// };
/// let context = ValidationContext {
///     contract: EmploymentContract {
///         id: "ctr_001".to_string(),
///         employee_id: "emp_001".to_string(),
///         start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         end_date: None,
///     },
///     existing: vec![],
/// };
/// assert!(validate_assignment(&candidate, &context).valid);
/// ```
pub fn validate_assignment(
    candidate: &ScheduleAssignment,
    context: &ValidationContext,
) -> ValidationResult {
    let mut conflicts = Vec::new();

    for existing in &context.existing {
        if existing.id == candidate.id || existing.employee_id != candidate.employee_id {
            continue;
        }
        if windows_overlap(
            candidate.valid_from,
            candidate.valid_to,
            existing.valid_from,
            existing.valid_to,
        ) {
            conflicts.push(Conflict {
                kind: ConflictKind::AssignmentOverlap,
                message: format!(
                    "assignment window overlaps existing assignment '{}' ({} to {})",
                    existing.id,
                    existing.valid_from,
                    existing
                        .valid_to
                        .map_or_else(|| "open".to_string(), |d| d.to_string()),
                ),
                conflicting_id: Some(existing.id.clone()),
            });
        }
    }

    if candidate.valid_from < context.contract.start_date {
        conflicts.push(Conflict {
            kind: ConflictKind::ContractBounds,
            message: format!(
                "assignment starts on {} before the contract starts on {}",
                candidate.valid_from, context.contract.start_date
            ),
            conflicting_id: Some(context.contract.id.clone()),
        });
    }
    if let Some(contract_end) = context.contract.end_date {
        match candidate.valid_to {
            Some(candidate_end) if candidate_end <= contract_end => {}
            Some(candidate_end) => {
                conflicts.push(Conflict {
                    kind: ConflictKind::ContractBounds,
                    message: format!(
                        "assignment ends on {} after the contract ends on {}",
                        candidate_end, contract_end
                    ),
                    conflicting_id: Some(context.contract.id.clone()),
                });
            }
            None => {
                conflicts.push(Conflict {
                    kind: ConflictKind::ContractBounds,
                    message: format!(
                        "open-ended assignment outlives the contract ending on {}",
                        contract_end
                    ),
                    conflicting_id: Some(context.contract.id.clone()),
                });
            }
        }
    }

    ValidationResult::from_conflicts(conflicts)
}
