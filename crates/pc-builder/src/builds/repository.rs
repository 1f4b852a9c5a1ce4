use super::domain::{BuildId, BuildRecord};

/// Storage abstraction for build records.
pub trait BuildRepository: Send + Sync {
    fn insert(&self, record: BuildRecord) -> Result<BuildRecord, RepositoryError>;
    fn update(&self, record: BuildRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: BuildId) -> Result<Option<BuildRecord>, RepositoryError>;
    fn delete(&self, id: BuildId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<BuildRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
