//! Gating predicates and consistency checks for assembly state
//!
//! All functions here are pure. A denial is a [`Permission::Denied`]
//! value carrying a [`Denial`] reason, never an error.

use super::AssemblyState;
use crate::part::Part;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Outcome of a detach/attach gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The action may be dispatched
    Allowed,
    /// The action must not be dispatched
    Denied(Denial),
}

impl Permission {
    /// True when allowed
    #[inline]
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Human-readable reason, present only on denial
    #[inline]
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Allowed => None,
            Self::Denied(denial) => Some(denial.reason()),
        }
    }
}

/// Why a detach/attach was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Denial {
    /// Part is already in the detached set
    AlreadyDetached,
    /// Part is flagged non-removable
    NotRemovable,
    /// Part is not in the detached set
    NotDetached,
}

impl Denial {
    /// Stable reason text for display
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AlreadyDetached => "Part is already detached.",
            Self::NotRemovable => "Part is not removable and cannot be detached.",
            Self::NotDetached => "Part is not currently detached and cannot be attached.",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Whether `part` may be detached from `state`
///
/// The already-detached check comes first, so a detached non-removable
/// part reports [`Denial::AlreadyDetached`].
#[must_use]
pub fn can_detach(part: &Part, state: &AssemblyState) -> Permission {
    if state.is_detached(&part.id) {
        return Permission::Denied(Denial::AlreadyDetached);
    }
    if !part.is_removable {
        return Permission::Denied(Denial::NotRemovable);
    }
    Permission::Allowed
}

/// Whether `part_id` may be re-attached
#[must_use]
pub fn can_attach(part_id: &str, state: &AssemblyState) -> Permission {
    if state.is_detached(part_id) {
        Permission::Allowed
    } else {
        Permission::Denied(Denial::NotDetached)
    }
}

/// One inconsistency between an assembly state and the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StateIssue {
    /// Detached id matches no part
    UnknownDetached {
        /// The dangling id
        part_id: String,
    },
    /// Detached part is flagged non-removable
    NotRemovableDetached {
        /// The part id
        part_id: String,
        /// The part's display name
        name: String,
    },
    /// Selected id matches no part
    UnknownSelected {
        /// The dangling id
        part_id: String,
    },
    /// Hovered id matches no part
    UnknownHovered {
        /// The dangling id
        part_id: String,
    },
}

impl fmt::Display for StateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDetached { part_id } => {
                write!(f, "Detached part ID \"{part_id}\" does not match any known part.")
            }
            Self::NotRemovableDetached { part_id, name } => write!(
                f,
                "Part \"{name}\" ({part_id}) is marked as detached but is not removable."
            ),
            Self::UnknownSelected { part_id } => {
                write!(f, "Selected part ID \"{part_id}\" does not match any known part.")
            }
            Self::UnknownHovered { part_id } => {
                write!(f, "Hovered part ID \"{part_id}\" does not match any known part.")
            }
        }
    }
}

/// Result of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyValidation {
    /// Every issue found, in check order
    pub issues: Vec<StateIssue>,
}

impl AssemblyValidation {
    /// True when no issue was found
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues rendered as descriptive strings
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Check a state against the catalog, accumulating every issue
///
/// Reports unknown detached ids, then non-removable detached parts, then
/// an unknown selection, then an unknown hover. Detached ids are checked
/// in sorted order so the report is deterministic.
#[must_use]
pub fn validate(state: &AssemblyState, parts: &[Part]) -> AssemblyValidation {
    let by_id: HashMap<&str, &Part> = parts.iter().map(|p| (p.id.as_str(), p)).collect();
    let known: HashSet<&str> = by_id.keys().copied().collect();

    let mut detached: Vec<&str> = state.detached_part_ids().iter().map(String::as_str).collect();
    detached.sort_unstable();

    let mut issues = Vec::new();

    for id in &detached {
        if !known.contains(id) {
            issues.push(StateIssue::UnknownDetached {
                part_id: (*id).to_string(),
            });
        }
    }

    for id in &detached {
        if let Some(part) = by_id.get(id) {
            if !part.is_removable {
                issues.push(StateIssue::NotRemovableDetached {
                    part_id: part.id.clone(),
                    name: part.name.clone(),
                });
            }
        }
    }

    if let Some(selected) = state.selected_part_id() {
        if !known.contains(selected) {
            issues.push(StateIssue::UnknownSelected {
                part_id: selected.to_string(),
            });
        }
    }

    if let Some(hovered) = state.hovered_part_id() {
        if !known.contains(hovered) {
            issues.push(StateIssue::UnknownHovered {
                part_id: hovered.to_string(),
            });
        }
    }

    AssemblyValidation { issues }
}

/// Order in which removable parts move out in the exploded view
///
/// Ascending criticality (low first, critical last); parts of equal
/// criticality keep catalog order. Non-removable parts are left out.
#[must_use]
pub fn explode_sequence(parts: &[Part]) -> Vec<&str> {
    let mut removable: Vec<&Part> = parts.iter().filter(|p| p.is_removable).collect();
    removable.sort_by_key(|p| p.criticality.rank());
    removable.into_iter().map(|p| p.id.as_str()).collect()
}
