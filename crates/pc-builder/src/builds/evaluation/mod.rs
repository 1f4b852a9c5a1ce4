//! Compatibility evaluation: an ordered list of findings for a build snapshot.
//!
//! Rules run independently and in a fixed order; none short-circuits another, and each
//! one is skipped when a slot it inspects is empty. Findings are advisory and never stop
//! a build from being saved.

mod rules;

use serde::{Deserialize, Serialize};

use super::snapshot::BuildSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Hard physical or electrical incompatibility.
    Error,
    /// Usable but risky.
    Warning,
}

/// The check that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityRule {
    Socket,
    MemoryType,
    GpuClearance,
    FormFactor,
    PowerSupply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub rule: CompatibilityRule,
    pub message: String,
}

impl Finding {
    pub fn error(rule: CompatibilityRule, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule,
            message: message.into(),
        }
    }

    pub fn warning(rule: CompatibilityRule, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

type Rule = fn(&BuildSnapshot) -> Option<Finding>;

const RULES: [Rule; 5] = [
    rules::socket,
    rules::memory_type,
    rules::gpu_clearance,
    rules::form_factor,
    rules::power_supply,
];

/// Run every compatibility rule against `build`, in rule order.
pub fn evaluate(build: &BuildSnapshot) -> Vec<Finding> {
    RULES.iter().filter_map(|rule| rule(build)).collect()
}
