//! Catalog loading and management for the schedule resolution engine.
//!
//! This module provides functionality to load schedule catalogs from YAML
//! files: the templates and periods the engine resolves against, with slot
//! times written as `HH:mm` clock strings.
//!
//! # Example
//!
//! ```no_run
//! use schedule_engine::config::CatalogLoader;
//!
//! let catalog = CatalogLoader::load("./config/demo").unwrap();
//! println!("Loaded catalog: {}", catalog.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::CatalogLoader;
pub use types::{CatalogMetadata, PatternDoc, PeriodDoc, PeriodsDoc, SlotDoc, TemplateDoc, TemplatesDoc};
