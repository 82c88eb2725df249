//! Catalog document types.
//!
//! This module contains the raw structures deserialized from the YAML
//! catalog files. Slot times appear as `HH:mm` clock strings in the files
//! and are converted into validated domain types by the loader.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::{PeriodCategory, ScheduleKind, SlotType};

/// Metadata about the catalog.
///
/// Identifies the catalog a template set was loaded from; carried for
/// logging and display.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMetadata {
    /// The human-readable catalog name.
    pub name: String,
    /// The catalog version or effective date.
    pub version: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Templates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesDoc {
    /// All templates defined by the catalog.
    pub templates: Vec<TemplateDoc>,
}

/// A template as written in `templates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDoc {
    /// The template identifier.
    pub id: String,
    /// The human-readable template name.
    pub name: String,
    /// How the template's patterns are matched to dates.
    pub kind: ScheduleKind,
    /// One pattern per weekday or cycle position.
    pub patterns: Vec<PatternDoc>,
}

/// A work day pattern as written in the catalog files.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDoc {
    /// The weekday (0 = Monday) or rotation cycle position.
    pub day_index: u8,
    /// The slots for this day.
    pub slots: Vec<SlotDoc>,
}

/// A time slot as written in the catalog files.
///
/// Times are `HH:mm` clock strings; `counts_as_work` defaults by slot type
/// (work counts, breaks do not).
#[derive(Debug, Clone, Deserialize)]
pub struct SlotDoc {
    /// The slot identifier.
    pub id: String,
    /// Start of the slot as an `HH:mm` clock string.
    pub start: String,
    /// End of the slot as an `HH:mm` clock string (up to "24:00").
    pub end: String,
    /// Whether this interval is work or a break.
    pub slot_type: SlotType,
    /// Whether the interval counts toward worked hours.
    #[serde(default)]
    pub counts_as_work: Option<bool>,
}

/// Periods configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsDoc {
    /// All periods defined by the catalog.
    pub periods: Vec<PeriodDoc>,
}

/// A schedule period as written in `periods.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodDoc {
    /// The period identifier.
    pub id: String,
    /// The template this period overrides.
    pub template_id: String,
    /// The category rank of this period.
    pub category: PeriodCategory,
    /// First active date (inclusive).
    pub start_date: NaiveDate,
    /// Last active date (inclusive), absent for open-ended periods.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// When the period record was created; used as a selection tie-break.
    pub created_at: DateTime<Utc>,
    /// The period's own pattern set.
    pub patterns: Vec<PatternDoc>,
}
