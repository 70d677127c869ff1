//! Testing utilities for the robot twin workspace
//!
//! Shared fixtures: the bundled sample catalogs and builders for small
//! hand-made parts lists and graphs.

#![allow(missing_docs)]

use twin_core::{
    AssemblyStore, Catalogs, Criticality, DependencyEdge, DependencyGraph, DependencyType, Part,
    PartCategory,
};

pub fn sample_catalogs() -> Catalogs {
    Catalogs::sample().unwrap()
}

pub fn sample_store() -> AssemblyStore {
    AssemblyStore::new(sample_catalogs())
}

pub fn sample_parts() -> Vec<Part> {
    sample_catalogs().parts.parts().to_vec()
}

pub fn sample_graph() -> DependencyGraph {
    sample_catalogs().graph
}

pub fn part(id: &str, criticality: Criticality, removable: bool) -> Part {
    Part::new(id, id, PartCategory::Electrical)
        .with_criticality(criticality)
        .with_removable(removable)
}

pub fn edge(from: &str, to: &str) -> DependencyEdge {
    DependencyEdge::new(from, to, DependencyType::Power)
}

pub fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
    DependencyGraph::from_edges(edges.iter().map(|(f, t)| edge(f, t)).collect())
}

/// Graph over `p0..pN` from index pairs, as produced by proptest strategies
pub fn indexed_graph(edges: &[(usize, usize)]) -> DependencyGraph {
    DependencyGraph::from_edges(
        edges
            .iter()
            .map(|(f, t)| edge(&format!("p{f}"), &format!("p{t}")))
            .collect(),
    )
}

pub fn indexed_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}
