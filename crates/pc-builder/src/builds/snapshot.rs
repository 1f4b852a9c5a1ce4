use serde::{Deserialize, Serialize};

use crate::components::{Case, ComponentKind, Cpu, Gpu, Motherboard, Price, Psu, Ram};

/// Resolved, immutable view of a build's component selection.
///
/// Every slot is optional: an unselected slot and a component that has since left the
/// catalog look the same here. Compatibility rules and metrics read nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    cpu: Option<Cpu>,
    gpu: Option<Gpu>,
    motherboard: Option<Motherboard>,
    ram: Option<Ram>,
    psu: Option<Psu>,
    case: Option<Case>,
}

impl BuildSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cpu(mut self, cpu: Cpu) -> Self {
        self.cpu = Some(cpu);
        self
    }

    pub fn with_gpu(mut self, gpu: Gpu) -> Self {
        self.gpu = Some(gpu);
        self
    }

    pub fn with_motherboard(mut self, motherboard: Motherboard) -> Self {
        self.motherboard = Some(motherboard);
        self
    }

    pub fn with_ram(mut self, ram: Ram) -> Self {
        self.ram = Some(ram);
        self
    }

    pub fn with_psu(mut self, psu: Psu) -> Self {
        self.psu = Some(psu);
        self
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = Some(case);
        self
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        self.cpu.as_ref()
    }

    pub fn gpu(&self) -> Option<&Gpu> {
        self.gpu.as_ref()
    }

    pub fn motherboard(&self) -> Option<&Motherboard> {
        self.motherboard.as_ref()
    }

    pub fn ram(&self) -> Option<&Ram> {
        self.ram.as_ref()
    }

    pub fn psu(&self) -> Option<&Psu> {
        self.psu.as_ref()
    }

    pub fn case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    /// Populated slots with their prices, in category order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentKind, Price)> {
        [
            self.cpu.map(|cpu| (ComponentKind::Cpu, cpu.avg_used_price)),
            self.gpu.map(|gpu| (ComponentKind::Gpu, gpu.avg_used_price)),
            self.motherboard
                .map(|board| (ComponentKind::Motherboard, board.avg_used_price)),
            self.ram.map(|ram| (ComponentKind::Ram, ram.avg_used_price)),
            self.psu.map(|psu| (ComponentKind::Psu, psu.avg_used_price)),
            self.case.map(|case| (ComponentKind::Case, case.avg_used_price)),
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }
}
