//! Derived build quantities: price, power draw, supply sizing, and performance.
//!
//! Policy constants are expressed as whole percentages so every result is computed
//! with integer arithmetic and truncates exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::{ComponentKind, Price};

use super::snapshot::BuildSnapshot;

/// Allowance for RAM, storage, and fans, which are not modelled individually.
pub const BASELINE_DRAW_WATTS: u32 = 50;

/// Recommended supply rating as a percentage of total draw (a 30% margin).
pub const PSU_HEADROOM_PERCENT: u32 = 130;

/// GPU share of the combined performance score.
pub const GPU_SCORE_WEIGHT_PERCENT: u64 = 60;

/// CPU share of the combined performance score.
pub const CPU_SCORE_WEIGHT_PERCENT: u64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetrics {
    pub total_price: Price,
    pub total_thermal_draw: u32,
    pub recommended_wattage: u32,
    pub performance_score: u64,
}

/// One populated slot's slice of the total price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetShare {
    pub kind: ComponentKind,
    pub label: &'static str,
    pub price: Price,
    pub share_percent: Decimal,
}

pub fn compute_metrics(build: &BuildSnapshot) -> BuildMetrics {
    BuildMetrics {
        total_price: total_price(build),
        total_thermal_draw: total_thermal_draw(build),
        recommended_wattage: recommended_wattage(build),
        performance_score: performance_score(build),
    }
}

/// Sum of the used prices of every populated slot.
pub fn total_price(build: &BuildSnapshot) -> Price {
    build.components().map(|(_, price)| price).sum()
}

/// CPU and GPU TDP plus the fixed baseline; absent parts contribute nothing.
pub fn total_thermal_draw(build: &BuildSnapshot) -> u32 {
    let cpu = build.cpu().map(|cpu| cpu.tdp).unwrap_or(0);
    let gpu = build.gpu().map(|gpu| gpu.tdp).unwrap_or(0);
    cpu.saturating_add(gpu).saturating_add(BASELINE_DRAW_WATTS)
}

pub fn recommended_wattage(build: &BuildSnapshot) -> u32 {
    let scaled = u64::from(total_thermal_draw(build)) * u64::from(PSU_HEADROOM_PERCENT) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// GPU-weighted blend of benchmark scores, truncated.
pub fn performance_score(build: &BuildSnapshot) -> u64 {
    let cpu = build
        .cpu()
        .map(|cpu| u64::from(cpu.benchmark_score))
        .unwrap_or(0);
    let gpu = build
        .gpu()
        .map(|gpu| u64::from(gpu.benchmark_score))
        .unwrap_or(0);

    (gpu * GPU_SCORE_WEIGHT_PERCENT + cpu * CPU_SCORE_WEIGHT_PERCENT) / 100
}

/// Price distribution across priced slots, in category order.
///
/// Shares are rounded to two decimals, so they may not add up to exactly 100.
pub fn budget_breakdown(build: &BuildSnapshot) -> Vec<BudgetShare> {
    let total = total_price(build).amount();
    if total.is_zero() {
        return Vec::new();
    }

    build
        .components()
        .filter(|(_, price)| !price.is_zero())
        .map(|(kind, price)| BudgetShare {
            kind,
            label: kind.label(),
            price,
            share_percent: (price.amount() * Decimal::ONE_HUNDRED / total).round_dp(2),
        })
        .collect()
}
