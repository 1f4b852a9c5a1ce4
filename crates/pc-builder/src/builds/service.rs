use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{CatalogError, ComponentCatalog, ComponentId};
use crate::components::Price;

use super::assessment::BuildAssessment;
use super::domain::{BuildDraft, BuildId, BuildRecord, ComponentSelection, OwnerId, Visibility};
use super::evaluation::Severity;
use super::repository::{BuildRepository, RepositoryError};
use super::snapshot::BuildSnapshot;
use super::validation::{check_draft, DraftViolation};

/// A stored build together with its freshly computed assessment.
#[derive(Debug, Clone, Serialize)]
pub struct BuildDetail {
    #[serde(flatten)]
    pub record: BuildRecord,
    pub assessment: BuildAssessment,
}

/// Compact row for build listings.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub id: BuildId,
    pub owner: OwnerId,
    pub name: String,
    pub visibility: Visibility,
    pub total_price: Price,
    pub performance_score: u64,
    pub compatible: bool,
    pub created_at: DateTime<Utc>,
}

/// Service composing the build repository, the catalog, and the assessment engine.
pub struct BuildService<R, C> {
    repository: Arc<R>,
    catalog: Arc<C>,
}

static BUILD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_build_id() -> BuildId {
    BuildId(BUILD_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

impl<R, C> BuildService<R, C>
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<C>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Save a new build for `owner`. Incompatible selections are still accepted.
    pub fn create(
        &self,
        owner: OwnerId,
        draft: BuildDraft,
    ) -> Result<BuildRecord, BuildServiceError> {
        self.validate(&draft)?;

        let now = Utc::now();
        let record = BuildRecord {
            id: next_build_id(),
            owner,
            name: draft.name.trim().to_string(),
            description: normalize_description(draft.description),
            visibility: draft.visibility,
            selection: draft.selection,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(build_id = %stored.id, owner = %stored.owner, "build created");
        Ok(stored)
    }

    /// Replace the content of a build. Builds owned by someone else read as missing.
    pub fn update(
        &self,
        owner: &OwnerId,
        id: BuildId,
        draft: BuildDraft,
    ) -> Result<BuildRecord, BuildServiceError> {
        let mut record = self.owned(owner, id)?;
        self.validate(&draft)?;

        record.name = draft.name.trim().to_string();
        record.description = normalize_description(draft.description);
        record.visibility = draft.visibility;
        record.selection = draft.selection;
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        info!(build_id = %record.id, owner = %record.owner, "build updated");
        Ok(record)
    }

    /// Remove a build, returning the deleted record.
    pub fn delete(&self, owner: &OwnerId, id: BuildId) -> Result<BuildRecord, BuildServiceError> {
        let record = self.owned(owner, id)?;
        self.repository.delete(id)?;
        info!(build_id = %id, owner = %owner, "build deleted");
        Ok(record)
    }

    /// Fetch a build as seen by `viewer`; private builds are visible to their owner only.
    pub fn get(
        &self,
        viewer: Option<&OwnerId>,
        id: BuildId,
    ) -> Result<BuildRecord, BuildServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if !record.visible_to(viewer) {
            return Err(BuildServiceError::Private(id));
        }

        Ok(record)
    }

    pub fn detail(
        &self,
        viewer: Option<&OwnerId>,
        id: BuildId,
    ) -> Result<BuildDetail, BuildServiceError> {
        let record = self.get(viewer, id)?;
        let assessment = self.assess(&record.selection)?;
        Ok(BuildDetail { record, assessment })
    }

    /// Public builds, newest first.
    pub fn list_public(&self) -> Result<Vec<BuildSummary>, BuildServiceError> {
        self.summaries(|record| record.is_public())
    }

    /// Every build belonging to `owner`, newest first.
    pub fn list_owned(&self, owner: &OwnerId) -> Result<Vec<BuildSummary>, BuildServiceError> {
        self.summaries(|record| record.is_owned_by(owner))
    }

    /// Dereference selected ids into component values.
    ///
    /// An id that no longer exists in the catalog resolves to an empty slot.
    pub fn resolve(&self, selection: &ComponentSelection) -> Result<BuildSnapshot, CatalogError> {
        let mut snapshot = BuildSnapshot::new();

        if let Some(cpu) = lookup(selection.cpu, |id| self.catalog.cpu(id))? {
            snapshot = snapshot.with_cpu(cpu);
        }
        if let Some(gpu) = lookup(selection.gpu, |id| self.catalog.gpu(id))? {
            snapshot = snapshot.with_gpu(gpu);
        }
        if let Some(board) = lookup(selection.motherboard, |id| self.catalog.motherboard(id))? {
            snapshot = snapshot.with_motherboard(board);
        }
        if let Some(ram) = lookup(selection.ram, |id| self.catalog.ram(id))? {
            snapshot = snapshot.with_ram(ram);
        }
        if let Some(psu) = lookup(selection.psu, |id| self.catalog.psu(id))? {
            snapshot = snapshot.with_psu(psu);
        }
        if let Some(case) = lookup(selection.case, |id| self.catalog.case(id))? {
            snapshot = snapshot.with_case(case);
        }

        Ok(snapshot)
    }

    pub fn assess(&self, selection: &ComponentSelection) -> Result<BuildAssessment, CatalogError> {
        let snapshot = self.resolve(selection)?;
        let assessment = BuildAssessment::of(&snapshot);
        debug!(
            errors = assessment.count(Severity::Error),
            warnings = assessment.count(Severity::Warning),
            "build assessed"
        );
        Ok(assessment)
    }

    fn owned(&self, owner: &OwnerId, id: BuildId) -> Result<BuildRecord, BuildServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .filter(|record| record.is_owned_by(owner))
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn validate(&self, draft: &BuildDraft) -> Result<(), BuildServiceError> {
        check_draft(draft)?;

        for (kind, selected) in draft.selection.slots() {
            if let Some(id) = selected {
                if self.catalog.entry(kind, id)?.is_none() {
                    return Err(DraftViolation::UnknownComponent { kind, id }.into());
                }
            }
        }

        Ok(())
    }

    fn summaries<F>(&self, include: F) -> Result<Vec<BuildSummary>, BuildServiceError>
    where
        F: Fn(&BuildRecord) -> bool,
    {
        let mut records: Vec<BuildRecord> = self
            .repository
            .list()?
            .into_iter()
            .filter(|record| include(record))
            .collect();
        records.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right.id.cmp(&left.id))
        });

        records
            .into_iter()
            .map(|record| -> Result<BuildSummary, BuildServiceError> {
                let assessment = self.assess(&record.selection)?;
                Ok(BuildSummary {
                    id: record.id,
                    owner: record.owner,
                    name: record.name,
                    visibility: record.visibility,
                    total_price: assessment.metrics.total_price,
                    performance_score: assessment.metrics.performance_score,
                    compatible: assessment.compatible,
                    created_at: record.created_at,
                })
            })
            .collect()
    }
}

fn lookup<T>(
    selected: Option<ComponentId>,
    fetch: impl FnOnce(ComponentId) -> Result<Option<T>, CatalogError>,
) -> Result<Option<T>, CatalogError> {
    Ok(selected.map(fetch).transpose()?.flatten())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Error raised by the build service.
#[derive(Debug, thiserror::Error)]
pub enum BuildServiceError {
    #[error(transparent)]
    Draft(#[from] DraftViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("build {0} is private")]
    Private(BuildId),
}
