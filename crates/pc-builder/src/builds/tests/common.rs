use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::builds::domain::{BuildDraft, BuildId, BuildRecord, ComponentSelection, Visibility};
use crate::builds::repository::{BuildRepository, RepositoryError};
use crate::builds::service::BuildService;
use crate::catalog::{CatalogEntry, ComponentId, InMemoryCatalog};
use crate::components::{
    Case, Component, Cpu, FormFactor, Gpu, MemoryType, Motherboard, Price, Psu, Ram, Socket,
};

pub(super) fn cpu(socket: Socket, tdp: u32, benchmark_score: u32) -> Cpu {
    Cpu {
        socket,
        tdp,
        benchmark_score,
        avg_used_price: Price::from_cents(15_000),
    }
}

pub(super) fn gpu(length_mm: u32, tdp: u32, benchmark_score: u32) -> Gpu {
    Gpu {
        length_mm,
        tdp,
        benchmark_score,
        avg_used_price: Price::from_cents(30_000),
    }
}

pub(super) fn motherboard(
    socket: Socket,
    memory_type: MemoryType,
    form_factor: FormFactor,
) -> Motherboard {
    Motherboard {
        socket,
        memory_type,
        form_factor,
        avg_used_price: Price::from_cents(9_000),
    }
}

pub(super) fn ram(memory_type: MemoryType) -> Ram {
    Ram {
        memory_type,
        avg_used_price: Price::from_cents(4_000),
    }
}

pub(super) fn psu(wattage: u32) -> Psu {
    Psu {
        wattage,
        avg_used_price: Price::from_cents(6_000),
    }
}

pub(super) fn case(form_factor: FormFactor, max_gpu_length_mm: u32) -> Case {
    Case {
        form_factor,
        max_gpu_length_mm,
        avg_used_price: Price::from_cents(5_000),
    }
}

fn entry(id: u64, name: &str, manufacturer: &str, component: Component) -> CatalogEntry {
    CatalogEntry {
        id: ComponentId(id),
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        component,
    }
}

/// Catalog with one compatible AM5 set (ids 1) and a few mismatching alternatives.
pub(super) fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for entry in [
        entry(1, "Ryzen 7 7700", "AMD", Component::Cpu(cpu(Socket::Am5, 65, 10_000))),
        entry(2, "Core i5-12400F", "Intel", Component::Cpu(cpu(Socket::Lga1700, 65, 9_000))),
        entry(1, "RTX 3070", "NVIDIA", Component::Gpu(gpu(267, 220, 20_000))),
        entry(2, "RX 7900 XTX", "AMD", Component::Gpu(gpu(344, 355, 30_000))),
        entry(
            1,
            "B650 Tomahawk",
            "MSI",
            Component::Motherboard(motherboard(Socket::Am5, MemoryType::Ddr5, FormFactor::Atx)),
        ),
        entry(1, "Fury Beast 32GB", "Kingston", Component::Ram(ram(MemoryType::Ddr5))),
        entry(2, "Vengeance LPX 16GB", "Corsair", Component::Ram(ram(MemoryType::Ddr4))),
        entry(1, "Focus GX-650", "Seasonic", Component::Psu(psu(650))),
        entry(2, "Smart 400W", "Thermaltake", Component::Psu(psu(400))),
        entry(1, "Meshify 2", "Fractal Design", Component::Case(case(FormFactor::Atx, 360))),
        entry(2, "NR200", "Cooler Master", Component::Case(case(FormFactor::MiniItx, 330))),
    ] {
        catalog.insert(entry);
    }
    catalog
}

pub(super) fn compatible_selection() -> ComponentSelection {
    ComponentSelection {
        cpu: Some(ComponentId(1)),
        gpu: Some(ComponentId(1)),
        motherboard: Some(ComponentId(1)),
        ram: Some(ComponentId(1)),
        psu: Some(ComponentId(1)),
        case: Some(ComponentId(1)),
    }
}

pub(super) fn draft(name: &str) -> BuildDraft {
    BuildDraft {
        name: name.to_string(),
        description: Some("1440p gaming".to_string()),
        visibility: Visibility::Public,
        selection: compatible_selection(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<BuildId, BuildRecord>>,
}

impl BuildRepository for MemoryRepository {
    fn insert(&self, record: BuildRecord) -> Result<BuildRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: BuildRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: BuildId) -> Result<Option<BuildRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn delete(&self, id: BuildId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<BuildRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl BuildRepository for UnavailableRepository {
    fn insert(&self, _record: BuildRecord) -> Result<BuildRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _record: BuildRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: BuildId) -> Result<Option<BuildRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn delete(&self, _id: BuildId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<BuildRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) type TestService = BuildService<MemoryRepository, InMemoryCatalog>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = BuildService::new(repository.clone(), Arc::new(catalog()));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
