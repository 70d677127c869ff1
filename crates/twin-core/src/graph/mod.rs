//! Dependency graph between parts
//!
//! The graph is a static list of directed, typed edges `from -> to`
//! meaning "removing `from` can break `to`". Parallel edges of different
//! types are kept; each is distinct. Cycles are a data anomaly that every
//! traversal tolerates.
//!
//! Traversals live in [`impact`] (forward reachability and severity) and
//! [`traversal`] (backward reachability, one-hop neighbours, teardown
//! ordering).

pub mod impact;
pub mod traversal;

use crate::error::{CatalogError, CatalogResult};
use crate::types::DependencyType;
use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed, typed dependency between two parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    /// Part whose removal propagates
    pub from_part_id: String,
    /// Part that is affected
    pub to_part_id: String,
    /// Kind of dependency
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
    /// Human-readable explanation
    #[serde(default)]
    pub description: String,
}

impl DependencyEdge {
    /// Create an edge with an empty description
    #[must_use]
    pub fn new(
        from_part_id: impl Into<String>,
        to_part_id: impl Into<String>,
        dependency_type: DependencyType,
    ) -> Self {
        Self {
            from_part_id: from_part_id.into(),
            to_part_id: to_part_id.into(),
            dependency_type,
            description: String::new(),
        }
    }

    /// Set description (builder pattern)
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this edge touches a part
    #[inline]
    #[must_use]
    pub fn involves_part(&self, part_id: &str) -> bool {
        self.from_part_id == part_id || self.to_part_id == part_id
    }
}

/// Wire shape of a graph document: `{ "edges": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GraphDocument {
    edges: Vec<DependencyEdge>,
}

impl From<GraphDocument> for DependencyGraph {
    fn from(doc: GraphDocument) -> Self {
        Self::from_edges(doc.edges)
    }
}

impl From<DependencyGraph> for GraphDocument {
    fn from(graph: DependencyGraph) -> Self {
        Self { edges: graph.edges }
    }
}

/// Static dependency graph with a prebuilt adjacency index
///
/// Adjacency lists hold edge positions in edge-list order, so walking them
/// visits edges in exactly the order a full scan of the list would.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
    outgoing: HashMap<String, Vec<usize>>,
    incoming: HashMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Build a graph and its adjacency index from an edge list
    #[must_use]
    pub fn from_edges(edges: Vec<DependencyEdge>) -> Self {
        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
        let mut incoming: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, edge) in edges.iter().enumerate() {
            outgoing
                .entry(edge.from_part_id.clone())
                .or_default()
                .push(i);
            incoming.entry(edge.to_part_id.clone()).or_default().push(i);
        }

        Self {
            edges,
            outgoing,
            incoming,
        }
    }

    /// Decode a `{ "edges": [...] }` JSON document
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] if the document does not match.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(|source| CatalogError::Decode {
            what: "dependency graph",
            source,
        })
    }

    /// All edges in catalog order
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no edges
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges leaving `part_id`, in catalog order
    pub fn edges_from<'g>(&'g self, part_id: &str) -> impl Iterator<Item = &'g DependencyEdge> + 'g {
        self.outgoing
            .get(part_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Edges entering `part_id`, in catalog order
    pub fn edges_to<'g>(&'g self, part_id: &str) -> impl Iterator<Item = &'g DependencyEdge> + 'g {
        self.incoming
            .get(part_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Every id named by an edge, in first-appearance order
    #[must_use]
    pub fn part_ids(&self) -> Vec<&str> {
        let ids: IndexSet<&str> = self
            .edges
            .iter()
            .flat_map(|e| [e.from_part_id.as_str(), e.to_part_id.as_str()])
            .collect();
        ids.into_iter().collect()
    }

    /// Groups of parts that depend on each other in a loop
    ///
    /// Each group is a strongly connected component with more than one
    /// member, or a single part with a self-edge. Members are sorted.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut g: DiGraphMap<&str, ()> = DiGraphMap::new();
        for edge in &self.edges {
            g.add_edge(edge.from_part_id.as_str(), edge.to_part_id.as_str(), ());
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&g)
            .into_iter()
            .filter(|scc| scc.len() > 1 || g.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<String> = scc.into_iter().map(str::to_string).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// True when no dependency loop exists
    #[inline]
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.cycles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge::new(from, to, DependencyType::Power)
    }

    #[test]
    fn adjacency_preserves_edge_order() {
        let graph = DependencyGraph::from_edges(vec![
            edge("a", "c"),
            edge("b", "c"),
            edge("a", "b"),
        ]);

        let out: Vec<&str> = graph.edges_from("a").map(|e| e.to_part_id.as_str()).collect();
        assert_eq!(out, vec!["c", "b"]);

        let inc: Vec<&str> = graph.edges_to("c").map(|e| e.from_part_id.as_str()).collect();
        assert_eq!(inc, vec!["a", "b"]);

        assert_eq!(graph.edges_from("missing").count(), 0);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let graph = DependencyGraph::from_edges(vec![
            DependencyEdge::new("a", "b", DependencyType::Power),
            DependencyEdge::new("a", "b", DependencyType::Data),
        ]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_from("a").count(), 2);
    }

    #[test]
    fn part_ids_in_first_appearance_order() {
        let graph = DependencyGraph::from_edges(vec![edge("x", "y"), edge("y", "z"), edge("x", "z")]);
        assert_eq!(graph.part_ids(), vec!["x", "y", "z"]);
    }

    #[test]
    fn cycles_detected() {
        let graph = DependencyGraph::from_edges(vec![
            edge("a", "b"),
            edge("b", "c"),
            edge("c", "a"),
            edge("c", "d"),
            edge("e", "e"),
        ]);

        assert!(!graph.is_acyclic());
        assert_eq!(
            graph.cycles(),
            vec![
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                vec!["e".to_string()],
            ]
        );
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let graph = DependencyGraph::from_edges(vec![edge("a", "b"), edge("b", "c")]);
        assert!(graph.is_acyclic());
    }

    #[test]
    fn json_round_trip_keeps_document_shape() {
        let json = r#"{"edges":[{"fromPartId":"a","toPartId":"b","type":"structural","description":"mount"}]}"#;
        let graph = DependencyGraph::from_json(json).unwrap();
        assert_eq!(graph.edges()[0].dependency_type, DependencyType::Structural);
        assert_eq!(graph.edges_from("a").count(), 1);

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["edges"][0]["fromPartId"], "a");
        assert_eq!(value["edges"][0]["type"], "structural");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = DependencyGraph::from_json("{\"edges\": 3}").unwrap_err();
        assert!(matches!(err, CatalogError::Decode { what: "dependency graph", .. }));
    }
}
