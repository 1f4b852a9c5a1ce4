mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::components::ComponentKind;

use super::store::{ComponentId, InMemoryCatalog};
use parser::CatalogRow;

pub use parser::RowRejection;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row {
        line: u64,
        source: RowRejection,
    },
    Duplicate {
        line: u64,
        kind: ComponentKind,
        id: ComponentId,
    },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Row { line, source } => {
                write!(f, "catalog row on line {} rejected: {}", line, source)
            }
            CatalogImportError::Duplicate { line, kind, id } => {
                write!(f, "duplicate {} id {} on line {}", kind, id, line)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Row { source, .. } => Some(source),
            CatalogImportError::Duplicate { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads a flat CSV catalog export, validating every row before it reaches a build.
///
/// Expected header: `kind,id,name,manufacturer,socket,memory_type,form_factor,tdp,length,`
/// `benchmark_score,wattage,max_gpu_length,avg_used_price`. The whole import fails on the
/// first rejected row.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut catalog = InMemoryCatalog::new();
        let mut seen: HashSet<(ComponentKind, ComponentId)> = HashSet::new();

        for result in csv_reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or_default();

            let row: CatalogRow = record.deserialize(Some(&headers))?;
            let entry = row
                .into_entry()
                .map_err(|source| CatalogImportError::Row { line, source })?;

            if !seen.insert((entry.kind(), entry.id)) {
                return Err(CatalogImportError::Duplicate {
                    line,
                    kind: entry.kind(),
                    id: entry.id,
                });
            }

            catalog.insert(entry);
        }

        debug!(records = catalog.len(), "catalog export imported");
        Ok(catalog)
    }
}
