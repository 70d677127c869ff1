//! Assembly store: the owned state plus shared catalogs
//!
//! [`AssemblyStore`] is the single write path for [`AssemblyState`]. Every
//! change goes through [`AssemblyStore::dispatch`], which runs the pure
//! reducer. Gated helpers check the validator first and only dispatch on
//! [`Permission::Allowed`]. [`SharedAssemblyStore`] wraps a store for use
//! from several threads.

use crate::assembly::validator::{self, AssemblyValidation, Permission};
use crate::assembly::{apply, AssemblyAction, AssemblyState};
use crate::catalog::{Catalogs, MaterialCatalog, PartCatalog};
use crate::error::{TwinError, TwinResult};
use crate::graph::impact::{self, ImpactAnalysis};
use crate::graph::DependencyGraph;
use crate::material::Material;
use crate::part::Part;
use crate::query;
use parking_lot::Mutex;
use std::sync::Arc;

/// Owned assembly state over read-only catalogs
#[derive(Debug, Clone)]
pub struct AssemblyStore {
    parts: Arc<PartCatalog>,
    graph: Arc<DependencyGraph>,
    materials: Arc<MaterialCatalog>,
    state: AssemblyState,
}

impl AssemblyStore {
    /// New store in the initial state
    #[must_use]
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            parts: Arc::new(catalogs.parts),
            graph: Arc::new(catalogs.graph),
            materials: Arc::new(catalogs.materials),
            state: AssemblyState::new(),
        }
    }

    /// New store sharing already loaded catalogs
    #[must_use]
    pub fn with_shared(
        parts: Arc<PartCatalog>,
        graph: Arc<DependencyGraph>,
        materials: Arc<MaterialCatalog>,
    ) -> Self {
        Self {
            parts,
            graph,
            materials,
            state: AssemblyState::new(),
        }
    }

    /// Replace the current state, e.g. with a restored one
    #[must_use]
    pub fn with_state(mut self, state: AssemblyState) -> Self {
        self.state = state;
        self
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &AssemblyState {
        &self.state
    }

    /// Parts catalog
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &PartCatalog {
        &self.parts
    }

    /// Dependency graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Materials catalog
    #[inline]
    #[must_use]
    pub fn materials(&self) -> &MaterialCatalog {
        &self.materials
    }

    /// Apply an action unconditionally
    pub fn dispatch(&mut self, action: &AssemblyAction) {
        tracing::debug!(action = action.name(), "dispatch");
        self.state = apply(&self.state, action);
    }

    /// Detach a part if the validator allows it
    ///
    /// State is unchanged on denial.
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::PartNotFound`] for an id not in the catalog.
    pub fn detach(&mut self, part_id: &str) -> TwinResult<Permission> {
        let part = self
            .parts
            .get(part_id)
            .ok_or_else(|| TwinError::PartNotFound(part_id.to_string()))?;
        let permission = validator::can_detach(part, &self.state);
        match permission {
            Permission::Allowed => self.dispatch(&AssemblyAction::detach(part_id)),
            Permission::Denied(denial) => {
                tracing::debug!(part = part_id, %denial, "detach denied");
            }
        }
        Ok(permission)
    }

    /// Re-attach a part if it is detached
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::PartNotFound`] for an id not in the catalog.
    pub fn attach(&mut self, part_id: &str) -> TwinResult<Permission> {
        if !self.parts.contains(part_id) {
            return Err(TwinError::PartNotFound(part_id.to_string()));
        }
        let permission = validator::can_attach(part_id, &self.state);
        match permission {
            Permission::Allowed => self.dispatch(&AssemblyAction::attach(part_id)),
            Permission::Denied(denial) => {
                tracing::debug!(part = part_id, %denial, "attach denied");
            }
        }
        Ok(permission)
    }

    /// Replace the selection
    pub fn select(&mut self, part_id: Option<&str>) {
        self.dispatch(&AssemblyAction::select(part_id));
    }

    /// Flip the exploded view
    pub fn toggle_explode(&mut self) {
        self.dispatch(&AssemblyAction::ToggleExplode);
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        self.dispatch(&AssemblyAction::Reset);
    }

    /// Set or clear the hovered part
    pub fn set_hovered(&mut self, part_id: Option<&str>) {
        self.state.set_hovered(part_id.map(str::to_string));
    }

    /// Check if a part is detached
    #[inline]
    #[must_use]
    pub fn is_detached(&self, part_id: &str) -> bool {
        self.state.is_detached(part_id)
    }

    /// The selected part, if the selection names a catalog part
    #[must_use]
    pub fn selected_part(&self) -> Option<&Part> {
        self.state
            .selected_part_id()
            .and_then(|id| self.parts.get(id))
    }

    /// Materials of the selected part, empty without a selection
    #[must_use]
    pub fn selected_materials(&self) -> Vec<&Material> {
        self.selected_part()
            .map(|part| query::part_materials(part, self.materials.as_map()))
            .unwrap_or_default()
    }

    /// Materials of any part, empty for an unknown id
    #[must_use]
    pub fn part_materials(&self, part_id: &str) -> Vec<&Material> {
        self.parts
            .get(part_id)
            .map(|part| query::part_materials(part, self.materials.as_map()))
            .unwrap_or_default()
    }

    /// Detached parts in catalog order
    #[must_use]
    pub fn detached_parts(&self) -> Vec<&Part> {
        self.parts
            .parts()
            .iter()
            .filter(|p| self.state.is_detached(&p.id))
            .collect()
    }

    /// Union of parts affected by every detached part
    ///
    /// Detached parts themselves are included only when reached from
    /// another detached part. Sorted for stable output.
    #[must_use]
    pub fn impacted_part_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .state
            .detached_part_ids()
            .iter()
            .flat_map(|id| impact::affected_parts(&self.graph, id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Impact analysis for removing one part
    #[must_use]
    pub fn impact(&self, part_id: &str) -> ImpactAnalysis {
        impact::impact_analysis(&self.graph, self.parts.parts(), part_id)
    }

    /// Validate the current state against the catalog
    ///
    /// Issues are also logged at warn level.
    #[must_use]
    pub fn validate(&self) -> AssemblyValidation {
        let report = validator::validate(&self.state, self.parts.parts());
        for issue in &report.issues {
            tracing::warn!(%issue, "assembly state");
        }
        report
    }
}

/// Thread-safe handle to an [`AssemblyStore`]
#[derive(Debug, Clone)]
pub struct SharedAssemblyStore {
    inner: Arc<Mutex<AssemblyStore>>,
}

impl SharedAssemblyStore {
    /// Wrap a store
    #[must_use]
    pub fn new(store: AssemblyStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Apply an action
    pub fn dispatch(&self, action: &AssemblyAction) {
        self.inner.lock().dispatch(action);
    }

    /// Gated detach
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::PartNotFound`] for an id not in the catalog.
    pub fn detach(&self, part_id: &str) -> TwinResult<Permission> {
        self.inner.lock().detach(part_id)
    }

    /// Gated attach
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::PartNotFound`] for an id not in the catalog.
    pub fn attach(&self, part_id: &str) -> TwinResult<Permission> {
        self.inner.lock().attach(part_id)
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> AssemblyState {
        self.inner.lock().state().clone()
    }

    /// Run a read-only closure against the store
    pub fn read<R>(&self, f: impl FnOnce(&AssemblyStore) -> R) -> R {
        f(&*self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::validator::Denial;
    use crate::types::Severity;

    fn store() -> AssemblyStore {
        AssemblyStore::new(Catalogs::sample().unwrap())
    }

    #[test]
    fn gated_detach_and_attach() {
        let mut store = store();

        assert!(store.detach("camera-module").unwrap().is_allowed());
        assert!(store.is_detached("camera-module"));

        assert_eq!(
            store.detach("camera-module").unwrap(),
            Permission::Denied(Denial::AlreadyDetached)
        );
        assert_eq!(
            store.detach("chassis").unwrap(),
            Permission::Denied(Denial::NotRemovable)
        );
        assert!(!store.is_detached("chassis"));

        assert_eq!(
            store.attach("wheel-left").unwrap(),
            Permission::Denied(Denial::NotDetached)
        );
        assert!(store.attach("camera-module").unwrap().is_allowed());
        assert!(store.state().detached_part_ids().is_empty());
    }

    #[test]
    fn unknown_part_is_an_error() {
        let mut store = store();
        assert!(matches!(store.detach("gripper"), Err(TwinError::PartNotFound(_))));
        assert!(matches!(store.attach("gripper"), Err(TwinError::PartNotFound(_))));
    }

    #[test]
    fn selection_and_materials() {
        let mut store = store();
        assert!(store.selected_part().is_none());
        assert!(store.selected_materials().is_empty());

        store.select(Some("jetson-nano"));
        let part = store.selected_part().unwrap();
        assert_eq!(part.id, "jetson-nano");
        assert_eq!(store.selected_materials().len(), part.material_ids.len());

        store.select(Some("nonexistent-id"));
        assert!(store.selected_part().is_none());
        assert_eq!(store.validate().issues.len(), 1);
    }

    #[test]
    fn impacted_ids_union_detached_parts() {
        let mut store = store();
        assert!(store.impacted_part_ids().is_empty());

        store.detach("motor-driver").unwrap();
        assert_eq!(store.impacted_part_ids(), vec!["wheel-left", "wheel-right"]);

        store.detach("battery-pack").unwrap();
        assert_eq!(
            store.impacted_part_ids(),
            vec![
                "antenna-left",
                "antenna-right",
                "camera-module",
                "jetson-nano",
                "motor-driver",
                "wheel-left",
                "wheel-right",
            ]
        );
        assert_eq!(store.detached_parts().len(), 2);
    }

    #[test]
    fn impact_matches_graph_engine() {
        let store = store();
        assert_eq!(store.impact("caster-ball").severity_level, Severity::None);
        assert_eq!(store.impact("wiring-harness").severity_level, Severity::NonFunctional);
    }

    #[test]
    fn hover_toggle_and_reset() {
        let mut store = store();
        store.set_hovered(Some("chassis"));
        store.toggle_explode();
        store.detach("antenna-left").unwrap();

        assert_eq!(store.state().hovered_part_id(), Some("chassis"));
        assert!(store.state().is_exploded());

        store.reset();
        assert_eq!(store.state(), &AssemblyState::new());
    }

    #[test]
    fn shared_store_serializes_access() {
        let shared = SharedAssemblyStore::new(store());
        let handles: Vec<_> = ["antenna-left", "antenna-right", "caster-ball"]
            .into_iter()
            .map(|id| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.detach(id).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_allowed());
        }

        assert_eq!(shared.snapshot().detached_part_ids().len(), 3);
        assert_eq!(shared.read(|s| s.detached_parts().len()), 3);
    }
}
