use serde::Serialize;

use super::evaluation::{evaluate, Finding, Severity};
use super::metrics::{budget_breakdown, compute_metrics, BudgetShare, BuildMetrics};
use super::snapshot::BuildSnapshot;

/// Everything presentation needs about a build, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildAssessment {
    pub compatible: bool,
    pub findings: Vec<Finding>,
    pub metrics: BuildMetrics,
    pub budget: Vec<BudgetShare>,
}

impl BuildAssessment {
    pub fn of(build: &BuildSnapshot) -> Self {
        let findings = evaluate(build);
        Self {
            compatible: !findings.iter().any(Finding::is_error),
            findings,
            metrics: compute_metrics(build),
            budget: budget_breakdown(build),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }
}
