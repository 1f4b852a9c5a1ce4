use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ComponentId;
use crate::components::ComponentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildId(pub u64);

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the user who owns a build. Authentication happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Catalog ids picked for each slot; at most one component per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSelection {
    #[serde(default)]
    pub cpu: Option<ComponentId>,
    #[serde(default)]
    pub gpu: Option<ComponentId>,
    #[serde(default)]
    pub motherboard: Option<ComponentId>,
    #[serde(default)]
    pub ram: Option<ComponentId>,
    #[serde(default)]
    pub psu: Option<ComponentId>,
    #[serde(default)]
    pub case: Option<ComponentId>,
}

impl ComponentSelection {
    pub fn slots(&self) -> [(ComponentKind, Option<ComponentId>); 6] {
        [
            (ComponentKind::Cpu, self.cpu),
            (ComponentKind::Gpu, self.gpu),
            (ComponentKind::Motherboard, self.motherboard),
            (ComponentKind::Ram, self.ram),
            (ComponentKind::Psu, self.psu),
            (ComponentKind::Case, self.case),
        ]
    }
}

/// User-supplied content of a build, used for both creation and edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub selection: ComponentSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: BuildId,
    pub owner: OwnerId,
    pub name: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub selection: ComponentSelection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuildRecord {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner == owner
    }

    /// Whether `viewer` may read this build: public builds are open, private ones owner-only.
    pub fn visible_to(&self, viewer: Option<&OwnerId>) -> bool {
        self.is_public() || viewer.is_some_and(|viewer| self.is_owned_by(viewer))
    }
}
