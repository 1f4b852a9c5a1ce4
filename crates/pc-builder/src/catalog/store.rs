use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::{Case, Component, ComponentKind, Cpu, Gpu, Motherboard, Psu, Ram};

use super::query::{self, ComponentFilter};

/// Identifier of a catalog record, unique within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog record: presentation metadata next to the typed component value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ComponentId,
    pub name: String,
    pub manufacturer: String,
    #[serde(flatten)]
    pub component: Component,
}

impl CatalogEntry {
    pub fn kind(&self) -> ComponentKind {
        self.component.kind()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Lookup seam used to resolve a build's selected ids into component values.
pub trait ComponentCatalog: Send + Sync {
    fn entry(
        &self,
        kind: ComponentKind,
        id: ComponentId,
    ) -> Result<Option<CatalogEntry>, CatalogError>;

    fn cpu(&self, id: ComponentId) -> Result<Option<Cpu>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Cpu, id)?
            .and_then(|entry| match entry.component {
                Component::Cpu(cpu) => Some(cpu),
                _ => None,
            }))
    }

    fn gpu(&self, id: ComponentId) -> Result<Option<Gpu>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Gpu, id)?
            .and_then(|entry| match entry.component {
                Component::Gpu(gpu) => Some(gpu),
                _ => None,
            }))
    }

    fn motherboard(&self, id: ComponentId) -> Result<Option<Motherboard>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Motherboard, id)?
            .and_then(|entry| match entry.component {
                Component::Motherboard(board) => Some(board),
                _ => None,
            }))
    }

    fn ram(&self, id: ComponentId) -> Result<Option<Ram>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Ram, id)?
            .and_then(|entry| match entry.component {
                Component::Ram(ram) => Some(ram),
                _ => None,
            }))
    }

    fn psu(&self, id: ComponentId) -> Result<Option<Psu>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Psu, id)?
            .and_then(|entry| match entry.component {
                Component::Psu(psu) => Some(psu),
                _ => None,
            }))
    }

    fn case(&self, id: ComponentId) -> Result<Option<Case>, CatalogError> {
        Ok(self
            .entry(ComponentKind::Case, id)?
            .and_then(|entry| match entry.component {
                Component::Case(case) => Some(case),
                _ => None,
            }))
    }
}

/// Catalog held entirely in memory, typically hydrated by [`super::CatalogImporter`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: BTreeMap<(ComponentKind, ComponentId), CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, handing back any record it replaced.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert((entry.kind(), entry.id), entry)
    }

    /// Drop a record. Builds that selected it resolve the slot as empty afterwards.
    pub fn remove(&mut self, kind: ComponentKind, id: ComponentId) -> Option<CatalogEntry> {
        self.entries.remove(&(kind, id))
    }

    pub fn get(&self, kind: ComponentKind, id: ComponentId) -> Option<&CatalogEntry> {
        self.entries.get(&(kind, id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self, kind: ComponentKind) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries
            .range((kind, ComponentId(0))..=(kind, ComponentId(u64::MAX)))
            .map(|(_, entry)| entry)
    }

    /// Record count per category, every category present even when empty.
    pub fn counts(&self) -> BTreeMap<ComponentKind, usize> {
        ComponentKind::ordered()
            .into_iter()
            .map(|kind| (kind, self.entries(kind).count()))
            .collect()
    }

    pub fn list(&self, kind: ComponentKind, filter: &ComponentFilter) -> Vec<CatalogEntry> {
        query::apply(kind, self.entries(kind), filter)
    }

    pub fn similar(&self, kind: ComponentKind, id: ComponentId, limit: usize) -> Vec<CatalogEntry> {
        match self.get(kind, id) {
            Some(reference) => query::similar_to(reference, self.entries(kind), limit),
            None => Vec::new(),
        }
    }
}

impl ComponentCatalog for InMemoryCatalog {
    fn entry(
        &self,
        kind: ComponentKind,
        id: ComponentId,
    ) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.get(kind, id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Price, Socket};

    fn cpu_entry(id: u64, socket: Socket) -> CatalogEntry {
        CatalogEntry {
            id: ComponentId(id),
            name: format!("Chip {id}"),
            manufacturer: "AMD".to_string(),
            component: Component::Cpu(Cpu {
                socket,
                tdp: 65,
                benchmark_score: 10_000,
                avg_used_price: Price::from_cents(10_000),
            }),
        }
    }

    #[test]
    fn typed_lookups_only_return_their_own_category() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(cpu_entry(7, Socket::Am4));

        let cpu = catalog.cpu(ComponentId(7)).expect("lookup succeeds");
        assert_eq!(cpu.map(|cpu| cpu.socket), Some(Socket::Am4));
        assert!(catalog.gpu(ComponentId(7)).expect("lookup").is_none());
        assert!(catalog.cpu(ComponentId(8)).expect("lookup").is_none());
    }

    #[test]
    fn counts_cover_every_category() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(cpu_entry(1, Socket::Am4));
        catalog.insert(cpu_entry(2, Socket::Am5));

        let counts = catalog.counts();
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[&ComponentKind::Cpu], 2);
        assert_eq!(counts[&ComponentKind::Case], 0);
    }

    #[test]
    fn removed_entries_no_longer_resolve() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(cpu_entry(1, Socket::Am4));
        assert!(catalog.remove(ComponentKind::Cpu, ComponentId(1)).is_some());
        assert!(catalog.cpu(ComponentId(1)).expect("lookup").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn entries_serialize_flat_with_kind_tag() {
        let value = serde_json::to_value(cpu_entry(3, Socket::Lga1700)).expect("serialize");
        assert_eq!(value["kind"], "cpu");
        assert_eq!(value["id"], 3);
        assert_eq!(value["socket"], "LGA1700");
        assert_eq!(value["avg_used_price"], "100.00");
    }
}
