//! Catalog loading functionality.
//!
//! This module provides the [`CatalogLoader`] type for loading schedule
//! catalogs (templates and periods) from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    SchedulePeriod, ScheduleTemplate, SlotType, TimeSlot, WorkDayPattern,
};
use crate::resolution::clock_to_minutes;
use crate::store::InMemoryStore;

use super::types::{CatalogMetadata, PatternDoc, PeriodsDoc, SlotDoc, TemplatesDoc};

/// Loads and provides access to a schedule catalog.
///
/// The `CatalogLoader` reads YAML files from a directory, converts the
/// clock-string slot times into validated domain types, and hands out the
/// templates and periods the HTTP layer serves resolutions from.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── catalog.yaml     # catalog metadata
/// ├── templates.yaml   # templates with work day patterns
/// └── periods.yaml     # periods referencing templates
/// ```
///
/// # Example
///
/// ```no_run
/// use schedule_engine::config::CatalogLoader;
///
/// let catalog = CatalogLoader::load("./config/demo").unwrap();
/// println!("Loaded catalog: {}", catalog.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    metadata: CatalogMetadata,
    templates: Vec<ScheduleTemplate>,
    periods: Vec<SchedulePeriod>,
}

impl CatalogLoader {
    /// Loads a catalog from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogNotFound`] when a required file is
    /// missing, [`EngineError::CatalogParseError`] on invalid YAML, and the
    /// underlying validation error when a slot range, pattern or period is
    /// malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata: CatalogMetadata = Self::load_yaml(&path.join("catalog.yaml"))?;
        let templates_doc: TemplatesDoc = Self::load_yaml(&path.join("templates.yaml"))?;
        let periods_doc: PeriodsDoc = Self::load_yaml(&path.join("periods.yaml"))?;

        let templates = templates_doc
            .templates
            .into_iter()
            .map(|doc| {
                let patterns = convert_patterns(doc.patterns)?;
                ScheduleTemplate::new(doc.id, doc.name, doc.kind, patterns)
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let periods = periods_doc
            .periods
            .into_iter()
            .map(|doc| {
                let patterns = convert_patterns(doc.patterns)?;
                SchedulePeriod::new(
                    doc.id,
                    doc.template_id,
                    doc.category,
                    doc.start_date,
                    doc.end_date,
                    doc.created_at,
                    patterns,
                )
            })
            .collect::<EngineResult<Vec<_>>>()?;

        // Reject periods pointing at templates the catalog does not define.
        for period in &periods {
            if !templates.iter().any(|t| t.id() == period.template_id()) {
                return Err(EngineError::TemplateNotFound {
                    template_id: period.template_id().to_string(),
                });
            }
        }

        Ok(Self {
            metadata,
            templates,
            periods,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::CatalogNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::CatalogParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the catalog metadata.
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Returns all templates defined by the catalog.
    pub fn templates(&self) -> &[ScheduleTemplate] {
        &self.templates
    }

    /// Returns all periods defined by the catalog.
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Returns the template with the given identifier, if defined.
    pub fn template(&self, template_id: &str) -> Option<&ScheduleTemplate> {
        self.templates.iter().find(|t| t.id() == template_id)
    }

    /// Builds an [`InMemoryStore`] seeded with the catalog's templates and
    /// periods. Employee-specific records are added by the caller.
    pub fn build_store(&self) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for template in &self.templates {
            store.add_template(template.clone());
        }
        for period in &self.periods {
            store.add_period(period.clone());
        }
        store
    }
}

/// Converts pattern documents into validated domain patterns.
fn convert_patterns(docs: Vec<PatternDoc>) -> EngineResult<Vec<WorkDayPattern>> {
    docs.into_iter()
        .map(|doc| {
            let slots = doc
                .slots
                .into_iter()
                .map(convert_slot)
                .collect::<EngineResult<Vec<_>>>()?;
            WorkDayPattern::new(doc.day_index, slots)
        })
        .collect()
}

/// Converts a slot document, parsing its clock-string bounds.
fn convert_slot(doc: SlotDoc) -> EngineResult<TimeSlot> {
    let start_minutes = clock_to_minutes(&doc.start)?;
    let end_minutes = clock_to_minutes(&doc.end)?;
    let counts_as_work = doc.counts_as_work.unwrap_or(doc.slot_type == SlotType::Work);
    TimeSlot::new(doc.id, start_minutes, end_minutes, doc.slot_type, counts_as_work)
}
