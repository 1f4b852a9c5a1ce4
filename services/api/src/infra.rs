use metrics_exporter_prometheus::PrometheusHandle;
use pc_builder::builds::{BuildId, BuildRecord, BuildRepository, RepositoryError};
use pc_builder::catalog::{CatalogImporter, InMemoryCatalog};
use pc_builder::error::AppError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Catalog shipped with the binary, used when no export is configured.
const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBuildRepository {
    records: Arc<Mutex<HashMap<BuildId, BuildRecord>>>,
}

impl InMemoryBuildRepository {
    fn records(&self) -> Result<MutexGuard<'_, HashMap<BuildId, BuildRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("build store lock poisoned".to_string()))
    }
}

impl BuildRepository for InMemoryBuildRepository {
    fn insert(&self, record: BuildRecord) -> Result<BuildRecord, RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: BuildRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: BuildId) -> Result<Option<BuildRecord>, RepositoryError> {
        Ok(self.records()?.get(&id).cloned())
    }

    fn delete(&self, id: BuildId) -> Result<(), RepositoryError> {
        self.records()?
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<BuildRecord>, RepositoryError> {
        Ok(self.records()?.values().cloned().collect())
    }
}

/// Import the catalog from `path`, or from the bundled sample when none is given.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<InMemoryCatalog, AppError> {
    let catalog = match path {
        Some(path) => {
            let catalog = CatalogImporter::from_path(path)?;
            info!(path = %path.display(), components = catalog.len(), "catalog imported");
            catalog
        }
        None => {
            let catalog = CatalogImporter::from_reader(SAMPLE_CATALOG.as_bytes())?;
            info!(components = catalog.len(), "sample catalog loaded");
            catalog
        }
    };

    Ok(catalog)
}
