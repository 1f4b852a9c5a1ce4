use crate::catalog::ComponentId;
use crate::components::ComponentKind;

use super::domain::BuildDraft;

pub(crate) const MAX_NAME_CHARS: usize = 200;

/// Slots a build must fill before it can be saved. GPU and case stay optional.
pub(crate) const REQUIRED_SLOTS: [ComponentKind; 4] = [
    ComponentKind::Cpu,
    ComponentKind::Motherboard,
    ComponentKind::Ram,
    ComponentKind::Psu,
];

/// Reasons a draft cannot be saved. Compatibility findings are never among them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftViolation {
    #[error("build name must not be blank")]
    BlankName,
    #[error("build name exceeds {max} characters")]
    NameTooLong { max: usize },
    #[error("no {0} selected")]
    MissingComponent(ComponentKind),
    #[error("{kind} {id} is not in the catalog")]
    UnknownComponent { kind: ComponentKind, id: ComponentId },
}

/// Field-level checks that need no catalog access.
pub(crate) fn check_draft(draft: &BuildDraft) -> Result<(), DraftViolation> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(DraftViolation::BlankName);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DraftViolation::NameTooLong {
            max: MAX_NAME_CHARS,
        });
    }

    for (kind, selected) in draft.selection.slots() {
        if selected.is_none() && REQUIRED_SLOTS.contains(&kind) {
            return Err(DraftViolation::MissingComponent(kind));
        }
    }

    Ok(())
}
