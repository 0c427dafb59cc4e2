use std::path::Path;
use std::sync::Arc;

use crate::{db::dataset::load_dataset, error::AppResult, models::CatalogEntry};

/// Read-only handle to the loaded catalog.
///
/// Loaded once at startup and shared by every request; cloning only bumps a
/// reference count.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[CatalogEntry]>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Loads the dataset file into a new handle
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        Ok(Self::new(load_dataset(path)?))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
