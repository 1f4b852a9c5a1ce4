//! Listing filters and sort orders for catalog browsing.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::{ComponentKind, FormFactor, MemoryType, Socket};

use super::store::CatalogEntry;

/// Benchmark window, in percent of the reference score, for "similar" GPUs.
const SIMILAR_BENCHMARK_PERCENT: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    BenchmarkAsc,
    BenchmarkDesc,
    Name,
    WattageDesc,
}

impl SortKey {
    /// Ordering used when a listing request does not pick one.
    pub const fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Cpu | ComponentKind::Gpu => Self::BenchmarkDesc,
            ComponentKind::Psu => Self::WattageDesc,
            ComponentKind::Motherboard | ComponentKind::Ram | ComponentKind::Case => Self::Name,
        }
    }
}

/// Listing criteria. Attribute filters only narrow categories that carry the attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentFilter {
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub socket: Option<Socket>,
    #[serde(default)]
    pub memory_type: Option<MemoryType>,
    #[serde(default)]
    pub form_factor: Option<FormFactor>,
    #[serde(default)]
    pub min_wattage: Option<u32>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl ComponentFilter {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(needle) = self.manufacturer.as_deref().map(str::trim) {
            if !needle.is_empty()
                && !entry
                    .manufacturer
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        let price = entry.component.avg_used_price().amount();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        attribute_matches(self.socket, entry.component.socket())
            && attribute_matches(self.memory_type, entry.component.memory_type())
            && attribute_matches(self.form_factor, entry.component.form_factor())
            && match (self.min_wattage, entry.component.wattage()) {
                (Some(min), Some(wattage)) => wattage >= min,
                _ => true,
            }
    }
}

fn attribute_matches<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    match (wanted, actual) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    }
}

pub(crate) fn apply<'a>(
    kind: ComponentKind,
    entries: impl Iterator<Item = &'a CatalogEntry>,
    filter: &ComponentFilter,
) -> Vec<CatalogEntry> {
    let mut matched: Vec<CatalogEntry> = entries
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect();

    let sort = filter.sort.unwrap_or_else(|| SortKey::default_for(kind));
    matched.sort_by(|left, right| compare(sort, left, right).then(left.id.cmp(&right.id)));
    matched
}

fn compare(sort: SortKey, left: &CatalogEntry, right: &CatalogEntry) -> Ordering {
    let by_name = || left.display_name().cmp(&right.display_name());
    let price = |entry: &CatalogEntry| entry.component.avg_used_price();

    match sort {
        SortKey::PriceAsc => price(left).cmp(&price(right)),
        SortKey::PriceDesc => price(right).cmp(&price(left)),
        SortKey::Name => by_name(),
        SortKey::BenchmarkAsc | SortKey::BenchmarkDesc => {
            match (
                left.component.benchmark_score(),
                right.component.benchmark_score(),
            ) {
                (Some(l), Some(r)) if sort == SortKey::BenchmarkAsc => l.cmp(&r),
                (Some(l), Some(r)) => r.cmp(&l),
                _ => by_name(),
            }
        }
        SortKey::WattageDesc => match (left.component.wattage(), right.component.wattage()) {
            (Some(l), Some(r)) => r.cmp(&l),
            _ => by_name(),
        },
    }
}

/// Alternatives to `reference`: CPUs on the same socket, GPUs within a benchmark band.
pub(crate) fn similar_to<'a>(
    reference: &CatalogEntry,
    candidates: impl Iterator<Item = &'a CatalogEntry>,
    limit: usize,
) -> Vec<CatalogEntry> {
    let kind = reference.kind();
    if !matches!(kind, ComponentKind::Cpu | ComponentKind::Gpu) {
        return Vec::new();
    }

    let reference_score = reference.component.benchmark_score().unwrap_or_default();
    let band = u64::from(reference_score) * SIMILAR_BENCHMARK_PERCENT / 100;

    candidates
        .filter(|candidate| candidate.id != reference.id)
        .filter(|candidate| match kind {
            ComponentKind::Cpu => candidate.component.socket() == reference.component.socket(),
            _ => candidate
                .component
                .benchmark_score()
                .map(|score| u64::from(score.abs_diff(reference_score)) <= band)
                .unwrap_or(false),
        })
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ComponentId, InMemoryCatalog};
    use crate::components::{Component, Cpu, Gpu, Price, Psu};
    use rust_decimal_macros::dec;

    fn cpu(id: u64, manufacturer: &str, socket: Socket, score: u32, cents: u32) -> CatalogEntry {
        CatalogEntry {
            id: ComponentId(id),
            name: format!("Model {id}"),
            manufacturer: manufacturer.to_string(),
            component: Component::Cpu(Cpu {
                socket,
                tdp: 65,
                benchmark_score: score,
                avg_used_price: Price::from_cents(cents),
            }),
        }
    }

    fn gpu(id: u64, score: u32) -> CatalogEntry {
        CatalogEntry {
            id: ComponentId(id),
            name: format!("Card {id}"),
            manufacturer: "NVIDIA".to_string(),
            component: Component::Gpu(Gpu {
                length_mm: 280,
                tdp: 200,
                benchmark_score: score,
                avg_used_price: Price::from_cents(30_000),
            }),
        }
    }

    fn psu(id: u64, wattage: u32) -> CatalogEntry {
        CatalogEntry {
            id: ComponentId(id),
            name: format!("{wattage}W"),
            manufacturer: "Seasonic".to_string(),
            component: Component::Psu(Psu {
                wattage,
                avg_used_price: Price::from_cents(5_000),
            }),
        }
    }

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        for entry in [
            cpu(1, "AMD", Socket::Am4, 18_000, 9_000),
            cpu(2, "AMD", Socket::Am5, 28_000, 21_000),
            cpu(3, "Intel", Socket::Lga1700, 24_000, 15_000),
            cpu(4, "AMD", Socket::Am4, 13_000, 6_000),
            gpu(10, 20_000),
            gpu(11, 22_000),
            gpu(12, 30_000),
            psu(20, 550),
            psu(21, 850),
        ] {
            catalog.insert(entry);
        }
        catalog
    }

    fn ids(entries: &[CatalogEntry]) -> Vec<u64> {
        entries.iter().map(|entry| entry.id.0).collect()
    }

    #[test]
    fn cpus_default_to_benchmark_descending() {
        let listed = catalog().list(ComponentKind::Cpu, &ComponentFilter::default());
        assert_eq!(ids(&listed), vec![2, 3, 1, 4]);
    }

    #[test]
    fn psus_default_to_wattage_descending() {
        let listed = catalog().list(ComponentKind::Psu, &ComponentFilter::default());
        assert_eq!(ids(&listed), vec![21, 20]);
    }

    #[test]
    fn filters_by_socket_manufacturer_and_price_range() {
        let filter = ComponentFilter {
            manufacturer: Some("amd".to_string()),
            min_price: Some(dec!(60.00)),
            max_price: Some(dec!(90.00)),
            socket: Some(Socket::Am4),
            sort: Some(SortKey::PriceAsc),
            ..ComponentFilter::default()
        };

        let listed = catalog().list(ComponentKind::Cpu, &filter);
        assert_eq!(ids(&listed), vec![4, 1]);
    }

    #[test]
    fn attribute_filters_ignore_categories_without_the_attribute() {
        let filter = ComponentFilter {
            socket: Some(Socket::Am5),
            ..ComponentFilter::default()
        };

        let listed = catalog().list(ComponentKind::Gpu, &filter);
        assert_eq!(listed.len(), 3);
    }

    #[test]
    fn min_wattage_narrows_power_supplies() {
        let filter = ComponentFilter {
            min_wattage: Some(600),
            ..ComponentFilter::default()
        };

        let listed = catalog().list(ComponentKind::Psu, &filter);
        assert_eq!(ids(&listed), vec![21]);
    }

    #[test]
    fn similar_cpus_share_the_socket() {
        let similar = catalog().similar(ComponentKind::Cpu, ComponentId(1), 4);
        assert_eq!(ids(&similar), vec![4]);
    }

    #[test]
    fn similar_gpus_stay_within_the_benchmark_band() {
        let similar = catalog().similar(ComponentKind::Gpu, ComponentId(10), 4);
        assert_eq!(ids(&similar), vec![11]);
    }

    #[test]
    fn similar_is_empty_for_other_categories_and_unknown_ids() {
        assert!(catalog()
            .similar(ComponentKind::Psu, ComponentId(20), 4)
            .is_empty());
        assert!(catalog()
            .similar(ComponentKind::Cpu, ComponentId(99), 4)
            .is_empty());
    }
}
