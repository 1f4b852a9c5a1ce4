//! Read-only hardware catalog: typed component records keyed by category and id.
//!
//! The build engine only ever sees the component values; names and manufacturers stay
//! here, alongside listing, filtering, and the CSV import boundary.

mod import;
pub mod query;
pub mod router;
mod store;

pub use import::{CatalogImportError, CatalogImporter, RowRejection};
pub use query::{ComponentFilter, SortKey};
pub use router::catalog_router;
pub use store::{CatalogEntry, CatalogError, ComponentCatalog, ComponentId, InMemoryCatalog};
