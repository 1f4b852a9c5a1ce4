//! User builds: selections of catalog components and their assessment.
//!
//! The compatibility rules and metrics operate on a resolved [`BuildSnapshot`] and are
//! pure; the service around them handles records, ownership, and catalog lookups.

mod assessment;
pub mod domain;
pub mod evaluation;
pub mod metrics;
pub mod repository;
pub mod router;
pub mod service;
mod snapshot;
mod validation;

#[cfg(test)]
mod tests;

pub use assessment::BuildAssessment;
pub use domain::{BuildDraft, BuildId, BuildRecord, ComponentSelection, OwnerId, Visibility};
pub use evaluation::{evaluate, CompatibilityRule, Finding, Severity};
pub use metrics::{
    budget_breakdown, compute_metrics, performance_score, recommended_wattage, total_price,
    total_thermal_draw, BudgetShare, BuildMetrics,
};
pub use repository::{BuildRepository, RepositoryError};
pub use router::build_router;
pub use service::{BuildDetail, BuildService, BuildServiceError, BuildSummary};
pub use snapshot::BuildSnapshot;
pub use validation::DraftViolation;
