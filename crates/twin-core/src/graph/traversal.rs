//! Backward reachability, one-hop neighbours and teardown ordering

use super::DependencyGraph;
use indexmap::IndexSet;
use std::collections::{HashSet, VecDeque};

/// Everything `part_id` transitively depends on
///
/// Breadth-first over incoming edges. `part_id` itself is excluded, each
/// ancestor appears once in discovery order, and cycles terminate.
#[must_use]
pub fn dependency_chain<'g>(graph: &'g DependencyGraph, part_id: &str) -> Vec<&'g str> {
    let mut ancestors = Vec::new();
    let mut visited: HashSet<&str> = HashSet::from([part_id]);
    let mut queue: VecDeque<&str> = VecDeque::from([part_id]);

    while let Some(current) = queue.pop_front() {
        for edge in graph.edges_to(current) {
            let prev = edge.from_part_id.as_str();
            if visited.insert(prev) {
                ancestors.push(prev);
                queue.push_back(prev);
            }
        }
    }

    ancestors
}

/// Targets of edges leaving `part_id`
///
/// One entry per edge: a target reached by parallel edges of different
/// types is listed once per edge.
#[must_use]
pub fn direct_dependents<'g>(graph: &'g DependencyGraph, part_id: &str) -> Vec<&'g str> {
    graph
        .edges_from(part_id)
        .map(|e| e.to_part_id.as_str())
        .collect()
}

/// Sources of edges entering `part_id`, one entry per edge
#[must_use]
pub fn direct_dependencies<'g>(graph: &'g DependencyGraph, part_id: &str) -> Vec<&'g str> {
    graph
        .edges_to(part_id)
        .map(|e| e.from_part_id.as_str())
        .collect()
}

/// Teardown order for a subset of parts
///
/// Restricts the graph to edges with both endpoints in `part_ids`, runs
/// Kahn's algorithm to get a build order (dependencies first), appends any
/// parts stuck in a cycle in their subset order, then reverses
/// the whole list. The result lists every dependent before the part it
/// depends on, so removing in order never pulls a part out from under
/// something still attached.
///
/// Duplicate ids in `part_ids` are collapsed to their first occurrence.
///
/// # Example
///
/// ```
/// use twin_core::graph::traversal::topological_sort;
/// use twin_core::{DependencyEdge, DependencyGraph, DependencyType};
///
/// let graph = DependencyGraph::from_edges(vec![
///     DependencyEdge::new("battery", "board", DependencyType::Power),
///     DependencyEdge::new("board", "camera", DependencyType::Data),
/// ]);
///
/// let order = topological_sort(&graph, &["battery", "camera", "board"]);
/// assert_eq!(order, vec!["camera", "board", "battery"]);
/// ```
#[must_use]
pub fn topological_sort<'a, S: AsRef<str>>(
    graph: &DependencyGraph,
    part_ids: &'a [S],
) -> Vec<&'a str> {
    let subset: IndexSet<&'a str> = part_ids.iter().map(AsRef::as_ref).collect();
    let n = subset.len();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree: Vec<usize> = vec![0; n];

    for edge in graph.edges() {
        let from = subset.get_index_of(edge.from_part_id.as_str());
        let to = subset.get_index_of(edge.to_part_id.as_str());
        if let (Some(from), Some(to)) = (from, to) {
            adjacency[from].push(to);
            in_degree[to] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut placed = vec![false; n];
    let mut order: Vec<usize> = Vec::with_capacity(n);

    while let Some(current) = queue.pop_front() {
        placed[current] = true;
        order.push(current);
        for &next in &adjacency[current] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < n {
        tracing::trace!(stuck = n - order.len(), "cycle in teardown subset");
        order.extend((0..n).filter(|&i| !placed[i]));
    }

    order.reverse();
    order.into_iter().map(|i| subset[i]).collect()
}
