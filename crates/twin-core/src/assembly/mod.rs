//! Assembly state and its reducer
//!
//! [`AssemblyState`] is the only mutable state in the core. It changes
//! through [`apply`], a pure and total function over the five
//! [`AssemblyAction`] variants. The reducer never checks preconditions;
//! callers gate detach/attach with [`validator`] first.

pub mod validator;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current detach/selection/view state of the virtual assembly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblyState {
    detached_part_ids: HashSet<String>,
    selected_part_id: Option<String>,
    hovered_part_id: Option<String>,
    is_exploded: bool,
}

impl AssemblyState {
    /// Initial state: nothing detached, nothing selected, not exploded
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from stored fields
    ///
    /// Intended for restoring persisted state; run
    /// [`validator::validate`] on the result before trusting it.
    #[must_use]
    pub fn restore<I, S>(
        detached_part_ids: I,
        selected_part_id: Option<String>,
        hovered_part_id: Option<String>,
        is_exploded: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            detached_part_ids: detached_part_ids.into_iter().map(Into::into).collect(),
            selected_part_id,
            hovered_part_id,
            is_exploded,
        }
    }

    /// Ids of detached parts (unordered)
    #[inline]
    #[must_use]
    pub fn detached_part_ids(&self) -> &HashSet<String> {
        &self.detached_part_ids
    }

    /// Check if a part is detached
    #[inline]
    #[must_use]
    pub fn is_detached(&self, part_id: &str) -> bool {
        self.detached_part_ids.contains(part_id)
    }

    /// Selected part id, if any
    #[inline]
    #[must_use]
    pub fn selected_part_id(&self) -> Option<&str> {
        self.selected_part_id.as_deref()
    }

    /// Hovered part id, if any
    #[inline]
    #[must_use]
    pub fn hovered_part_id(&self) -> Option<&str> {
        self.hovered_part_id.as_deref()
    }

    /// Whether the exploded view is on
    #[inline]
    #[must_use]
    pub fn is_exploded(&self) -> bool {
        self.is_exploded
    }

    /// Pointer hover lives outside the reducer actions
    pub(crate) fn set_hovered(&mut self, part_id: Option<String>) {
        self.hovered_part_id = part_id;
    }
}

/// The closed set of assembly state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblyAction {
    /// Add a part to the detached set
    #[serde(rename_all = "camelCase")]
    DetachPart {
        /// Part to detach
        part_id: String,
    },
    /// Remove a part from the detached set
    #[serde(rename_all = "camelCase")]
    AttachPart {
        /// Part to re-attach
        part_id: String,
    },
    /// Replace the selection (unknown ids and `None` are legal)
    #[serde(rename_all = "camelCase")]
    SelectPart {
        /// New selection
        part_id: Option<String>,
    },
    /// Flip the exploded view flag
    ToggleExplode,
    /// Return to the initial state
    Reset,
}

impl AssemblyAction {
    /// `DetachPart` shorthand
    #[inline]
    #[must_use]
    pub fn detach(part_id: impl Into<String>) -> Self {
        Self::DetachPart {
            part_id: part_id.into(),
        }
    }

    /// `AttachPart` shorthand
    #[inline]
    #[must_use]
    pub fn attach(part_id: impl Into<String>) -> Self {
        Self::AttachPart {
            part_id: part_id.into(),
        }
    }

    /// `SelectPart` shorthand
    #[inline]
    #[must_use]
    pub fn select(part_id: Option<impl Into<String>>) -> Self {
        Self::SelectPart {
            part_id: part_id.map(Into::into),
        }
    }

    /// Short name for logging
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DetachPart { .. } => "DETACH_PART",
            Self::AttachPart { .. } => "ATTACH_PART",
            Self::SelectPart { .. } => "SELECT_PART",
            Self::ToggleExplode => "TOGGLE_EXPLODE",
            Self::Reset => "RESET",
        }
    }
}

/// Apply an action, returning the next state
///
/// Total and infallible; `state` is left untouched. Detaching an already
/// detached part and attaching a part that is not detached are no-ops on
/// the detached set.
///
/// # Example
///
/// ```
/// use twin_core::assembly::{apply, AssemblyAction, AssemblyState};
///
/// let start = AssemblyState::new();
/// let next = apply(&start, &AssemblyAction::detach("antenna-left"));
///
/// assert!(next.is_detached("antenna-left"));
/// assert!(!start.is_detached("antenna-left"));
/// ```
#[must_use]
pub fn apply(state: &AssemblyState, action: &AssemblyAction) -> AssemblyState {
    match action {
        AssemblyAction::DetachPart { part_id } => {
            let mut next = state.clone();
            next.detached_part_ids.insert(part_id.clone());
            next
        }
        AssemblyAction::AttachPart { part_id } => {
            let mut next = state.clone();
            next.detached_part_ids.remove(part_id);
            next
        }
        AssemblyAction::SelectPart { part_id } => AssemblyState {
            selected_part_id: part_id.clone(),
            ..state.clone()
        },
        AssemblyAction::ToggleExplode => AssemblyState {
            is_exploded: !state.is_exploded,
            ..state.clone()
        },
        AssemblyAction::Reset => AssemblyState::new(),
    }
}
