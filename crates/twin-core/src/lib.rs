//! Twin Core - digital twin of a small robot
//!
//! Models a robot as a catalog of parts, materials and a typed dependency
//! graph between parts, and answers questions about it:
//! - What breaks, and how badly, if a part is removed
//! - What a part transitively depends on
//! - In which order a set of parts can be torn down
//! - Which parts are detached, selected or hovered in a virtual assembly
//!
//! The catalogs are static. The only mutable state is the
//! [`AssemblyState`], changed through a pure reducer and owned by an
//! [`AssemblyStore`].
//!
//! # Example
//!
//! ```
//! use twin_core::{AssemblyStore, Catalogs, Severity};
//!
//! let mut store = AssemblyStore::new(Catalogs::sample()?);
//!
//! let impact = store.impact("wiring-harness");
//! assert_eq!(impact.severity_level, Severity::NonFunctional);
//!
//! assert!(store.detach("antenna-left")?.is_allowed());
//! assert!(!store.detach("chassis")?.is_allowed());
//! # Ok::<(), twin_core::TwinError>(())
//! ```

#![warn(unreachable_pub)]

pub mod assembly;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod material;
pub mod part;
pub mod query;
pub mod sample;
pub mod store;
pub mod types;

pub use assembly::validator::{AssemblyValidation, Denial, Permission, StateIssue};
pub use assembly::{AssemblyAction, AssemblyState};
pub use catalog::{check_integrity, Catalogs, IntegrityIssue, MaterialCatalog, PartCatalog};
pub use config::{CatalogPaths, TwinConfig};
pub use error::{CatalogError, CatalogResult, ConfigError, TwinError, TwinResult};
pub use graph::impact::ImpactAnalysis;
pub use graph::{DependencyEdge, DependencyGraph};
pub use material::{ElectricalClass, ElectricalConductivity, Material, ThermalClass, ThermalConductivity};
pub use part::{Dimensions, ElectricalResistance, Part, PartUpdate};
pub use store::{AssemblyStore, SharedAssemblyStore};
pub use types::{Criticality, DependencyType, PartCategory, Severity};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Twin Core
    pub use crate::assembly::validator::{can_attach, can_detach, explode_sequence, validate};
    pub use crate::graph::impact::{affected_parts, impact_analysis};
    pub use crate::graph::traversal::{
        dependency_chain, direct_dependencies, direct_dependents, topological_sort,
    };
    pub use crate::{
        AssemblyAction, AssemblyState, AssemblyStore, Catalogs, Criticality, DependencyEdge,
        DependencyGraph, DependencyType, Part, PartCategory, Permission, Severity, TwinConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
