//! Application state for the schedule resolution API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::CatalogLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded schedule catalog.
#[derive(Clone)]
pub struct AppState {
    /// The loaded schedule catalog.
    catalog: Arc<CatalogLoader>,
}

impl AppState {
    /// Creates a new application state with the given catalog.
    pub fn new(catalog: CatalogLoader) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Returns a reference to the catalog.
    pub fn catalog(&self) -> &CatalogLoader {
        &self.catalog
    }
}
