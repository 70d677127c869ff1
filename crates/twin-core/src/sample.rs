//! Bundled JetBot sample catalogs
//!
//! Eleven parts, ten materials and twenty-one dependency edges describing
//! a small two-wheeled robot built around a Jetson Nano. Used as the
//! fallback for unset catalog paths and as a test fixture.

use crate::catalog::{MaterialCatalog, PartCatalog};
use crate::error::CatalogResult;
use crate::graph::DependencyGraph;

const PARTS_JSON: &str = include_str!("../data/parts.json");
const GRAPH_JSON: &str = include_str!("../data/dependency_graph.json");
const MATERIALS_JSON: &str = include_str!("../data/materials.json");

/// Sample parts catalog
///
/// # Errors
///
/// Fails only if the bundled document is corrupt.
pub fn parts() -> CatalogResult<PartCatalog> {
    PartCatalog::from_json(PARTS_JSON)
}

/// Sample dependency graph
///
/// # Errors
///
/// Fails only if the bundled document is corrupt.
pub fn dependency_graph() -> CatalogResult<DependencyGraph> {
    DependencyGraph::from_json(GRAPH_JSON)
}

/// Sample materials catalog
///
/// # Errors
///
/// Fails only if the bundled document is corrupt.
pub fn materials() -> CatalogResult<MaterialCatalog> {
    MaterialCatalog::from_json(MATERIALS_JSON)
}
