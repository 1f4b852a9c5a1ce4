use super::super::metrics::recommended_wattage;
use super::super::snapshot::BuildSnapshot;
use super::{CompatibilityRule, Finding};

pub(crate) fn socket(build: &BuildSnapshot) -> Option<Finding> {
    let (cpu, board) = (build.cpu()?, build.motherboard()?);
    if cpu.socket == board.socket {
        return None;
    }

    Some(Finding::error(
        CompatibilityRule::Socket,
        format!(
            "CPU socket ({}) is not compatible with the motherboard socket ({})",
            cpu.socket, board.socket
        ),
    ))
}

pub(crate) fn memory_type(build: &BuildSnapshot) -> Option<Finding> {
    let (ram, board) = (build.ram()?, build.motherboard()?);
    if ram.memory_type == board.memory_type {
        return None;
    }

    Some(Finding::error(
        CompatibilityRule::MemoryType,
        format!(
            "memory type ({}) is not supported by the motherboard ({})",
            ram.memory_type, board.memory_type
        ),
    ))
}

pub(crate) fn gpu_clearance(build: &BuildSnapshot) -> Option<Finding> {
    let (gpu, case) = (build.gpu()?, build.case()?);
    if gpu.length_mm <= case.max_gpu_length_mm {
        return None;
    }

    Some(Finding::error(
        CompatibilityRule::GpuClearance,
        format!(
            "GPU ({} mm) does not fit in the case (max {} mm)",
            gpu.length_mm, case.max_gpu_length_mm
        ),
    ))
}

pub(crate) fn form_factor(build: &BuildSnapshot) -> Option<Finding> {
    let (board, case) = (build.motherboard()?, build.case()?);
    if board.form_factor.fits_in(case.form_factor) {
        return None;
    }

    Some(Finding::error(
        CompatibilityRule::FormFactor,
        format!(
            "motherboard form factor ({}) does not fit the case ({})",
            board.form_factor, case.form_factor
        ),
    ))
}

pub(crate) fn power_supply(build: &BuildSnapshot) -> Option<Finding> {
    let psu = build.psu()?;
    let recommended = recommended_wattage(build);
    if psu.wattage >= recommended {
        return None;
    }

    Some(Finding::warning(
        CompatibilityRule::PowerSupply,
        format!(
            "power supply ({} W) may be insufficient; recommended: {} W",
            psu.wattage, recommended
        ),
    ))
}
