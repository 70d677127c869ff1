//! Impact of removing a part
//!
//! Forward reachability over every edge type, plus a severity class
//! derived from the criticality of what is reached.

use super::DependencyGraph;
use crate::part::Part;
use crate::types::{Criticality, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Result of analysing the removal of one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    /// The part being removed
    pub removed_part_id: String,
    /// Parts transitively affected, in discovery order
    pub affected_part_ids: Vec<String>,
    /// Severity class
    pub severity_level: Severity,
    /// Sentence describing the consequence
    pub description: String,
}

/// Parts transitively reachable from `removed_part_id`
///
/// Breadth-first over outgoing edges of any type. The removed part itself
/// is never in the result, each id appears once, and the order is the
/// order of first discovery. Cycles terminate through the visited set.
#[must_use]
pub fn affected_parts<'g>(graph: &'g DependencyGraph, removed_part_id: &str) -> Vec<&'g str> {
    let mut affected = Vec::new();
    let mut visited: HashSet<&str> = HashSet::from([removed_part_id]);
    let mut queue: VecDeque<&str> = VecDeque::from([removed_part_id]);

    while let Some(current) = queue.pop_front() {
        for edge in graph.edges_from(current) {
            let next = edge.to_part_id.as_str();
            if visited.insert(next) {
                affected.push(next);
                queue.push_back(next);
            }
        }
    }

    tracing::trace!(removed = removed_part_id, affected = affected.len(), "forward traversal");
    affected
}

/// Full impact analysis for removing a part
///
/// Severity is `None` when nothing is affected, `NonFunctional` when any
/// affected part is critical, and `Degraded` otherwise. Medium/low-only
/// impact is still `Degraded`; there is no separate minor tier. Affected
/// ids missing from `parts` count toward the total but not the severity.
#[must_use]
pub fn impact_analysis(
    graph: &DependencyGraph,
    parts: &[Part],
    removed_part_id: &str,
) -> ImpactAnalysis {
    let affected = affected_parts(graph, removed_part_id);

    if affected.is_empty() {
        return ImpactAnalysis {
            removed_part_id: removed_part_id.to_string(),
            affected_part_ids: Vec::new(),
            severity_level: Severity::None,
            description: "Removing this part has no downstream impact.".to_string(),
        };
    }

    let by_id: HashMap<&str, &Part> = parts.iter().map(|p| (p.id.as_str(), p)).collect();
    let highest = affected
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|p| p.criticality)
        .max();

    let count = affected.len();
    let (severity_level, description) = match highest {
        Some(Criticality::Critical) => (
            Severity::NonFunctional,
            format!(
                "Removing this part affects {count} part(s), including critical components. \
                 The robot will be non-functional."
            ),
        ),
        Some(Criticality::High) => (
            Severity::Degraded,
            format!(
                "Removing this part affects {count} part(s), including high-priority components. \
                 The robot will operate in a degraded state."
            ),
        ),
        _ => (
            Severity::Degraded,
            format!(
                "Removing this part affects {count} part(s). \
                 The robot may experience reduced capability."
            ),
        ),
    };

    ImpactAnalysis {
        removed_part_id: removed_part_id.to_string(),
        affected_part_ids: affected.into_iter().map(str::to_string).collect(),
        severity_level,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyEdge;
    use crate::types::{DependencyType, PartCategory};

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        DependencyGraph::from_edges(
            edges
                .iter()
                .map(|(f, t)| DependencyEdge::new(*f, *t, DependencyType::Data))
                .collect(),
        )
    }

    fn part(id: &str, criticality: Criticality) -> Part {
        Part::new(id, id, PartCategory::Electrical).with_criticality(criticality)
    }

    #[test]
    fn bfs_order_and_uniqueness() {
        let g = graph(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")]);
        assert_eq!(affected_parts(&g, "a"), vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn leaf_has_no_affected_parts() {
        let g = graph(&[("a", "b")]);
        assert!(affected_parts(&g, "b").is_empty());
        assert!(affected_parts(&g, "unknown").is_empty());
    }

    #[test]
    fn cycle_through_start_terminates_without_self() {
        let g = graph(&[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(affected_parts(&g, "a"), vec!["b", "c"]);
    }

    #[test]
    fn severity_none_for_leaf() {
        let g = graph(&[("a", "b")]);
        let parts = vec![part("a", Criticality::Low), part("b", Criticality::Critical)];
        let impact = impact_analysis(&g, &parts, "b");

        assert_eq!(impact.severity_level, Severity::None);
        assert!(impact.affected_part_ids.is_empty());
        assert_eq!(impact.description, "Removing this part has no downstream impact.");
    }

    #[test]
    fn severity_non_functional_when_critical_reached() {
        let g = graph(&[("a", "b"), ("b", "c")]);
        let parts = vec![
            part("a", Criticality::Low),
            part("b", Criticality::Low),
            part("c", Criticality::Critical),
        ];
        let impact = impact_analysis(&g, &parts, "a");

        assert_eq!(impact.severity_level, Severity::NonFunctional);
        assert!(impact.description.contains("affects 2 part(s)"));
        assert!(impact.description.contains("non-functional"));
    }

    #[test]
    fn severity_degraded_when_high_reached() {
        let g = graph(&[("a", "b")]);
        let parts = vec![part("a", Criticality::Low), part("b", Criticality::High)];
        let impact = impact_analysis(&g, &parts, "a");

        assert_eq!(impact.severity_level, Severity::Degraded);
        assert!(impact.description.contains("high-priority"));
    }

    #[test]
    fn medium_and_low_only_still_degraded() {
        let g = graph(&[("a", "b"), ("a", "c")]);
        let parts = vec![
            part("a", Criticality::Critical),
            part("b", Criticality::Medium),
            part("c", Criticality::Low),
        ];
        let impact = impact_analysis(&g, &parts, "a");

        assert_eq!(impact.severity_level, Severity::Degraded);
        assert!(impact.description.contains("reduced capability"));
    }

    #[test]
    fn unknown_affected_ids_do_not_raise_severity() {
        let g = graph(&[("a", "ghost")]);
        let impact = impact_analysis(&g, &[part("a", Criticality::Critical)], "a");

        assert_eq!(impact.affected_part_ids, vec!["ghost"]);
        assert_eq!(impact.severity_level, Severity::Degraded);
    }
}
