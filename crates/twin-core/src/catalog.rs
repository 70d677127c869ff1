//! Static catalogs: parts, materials and the dependency graph
//!
//! Catalogs are loaded once and shared read-only. [`Catalogs::load`]
//! reads JSON documents named by a [`TwinConfig`], falling back to the
//! bundled sample for any catalog the config leaves unset, and runs
//! [`check_integrity`] on the result.

use crate::config::TwinConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::graph::DependencyGraph;
use crate::material::Material;
use crate::part::{Part, PartUpdate};
use crate::sample;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Parts in catalog order with an id index
///
/// Catalog order matters: stable orderings (explode sequence, connected
/// parts) follow it.
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    parts: Vec<Part>,
    index: HashMap<String, usize>,
}

impl PartCatalog {
    /// Build a catalog, rejecting duplicate ids
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicatePart`] on the first repeated id.
    pub fn new(parts: Vec<Part>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            if index.insert(part.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePart(part.id.clone()));
            }
        }
        Ok(Self { parts, index })
    }

    /// Decode a JSON array of parts
    ///
    /// # Errors
    ///
    /// Returns a decode error or a duplicate-id error.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let parts: Vec<Part> = serde_json::from_str(json).map_err(|source| {
            CatalogError::Decode {
                what: "parts",
                source,
            }
        })?;
        Self::new(parts)
    }

    /// All parts in catalog order
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Part by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Part> {
        self.index.get(id).map(|&i| &self.parts[i])
    }

    /// Check if an id is in the catalog
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of parts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Patch a part's mutable fields
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PartNotFound`] for an unknown id.
    pub fn update(&mut self, id: &str, update: PartUpdate) -> CatalogResult<&Part> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| CatalogError::PartNotFound(id.to_string()))?;
        let part = &mut self.parts[i];
        part.apply(update);
        tracing::debug!(part = id, "part updated");
        Ok(part)
    }
}

/// Materials keyed by id
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    materials: HashMap<String, Material>,
}

impl MaterialCatalog {
    /// Build a catalog, rejecting duplicate ids
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateMaterial`] on the first repeated id.
    pub fn new(materials: Vec<Material>) -> CatalogResult<Self> {
        let mut map = HashMap::with_capacity(materials.len());
        for material in materials {
            let id = material.id.clone();
            if map.insert(id.clone(), material).is_some() {
                return Err(CatalogError::DuplicateMaterial(id));
            }
        }
        Ok(Self { materials: map })
    }

    /// Decode a JSON array of materials
    ///
    /// # Errors
    ///
    /// Returns a decode error or a duplicate-id error.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let materials: Vec<Material> = serde_json::from_str(json).map_err(|source| {
            CatalogError::Decode {
                what: "materials",
                source,
            }
        })?;
        Self::new(materials)
    }

    /// Material by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Lookup table for [`crate::query::part_materials`]
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &HashMap<String, Material> {
        &self.materials
    }

    /// Number of materials
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// A reference problem across the catalogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IntegrityIssue {
    /// `connectedPartIds` names an unknown part
    DanglingConnection {
        /// Part holding the reference
        part_id: String,
        /// The unknown id
        missing: String,
    },
    /// `dependsOnPartIds` names an unknown part
    DanglingDependsOn {
        /// Part holding the reference
        part_id: String,
        /// The unknown id
        missing: String,
    },
    /// A dependency edge names an unknown part
    DanglingEdge {
        /// Edge source
        from: String,
        /// Edge target
        to: String,
        /// The unknown endpoint
        missing: String,
    },
    /// `materialIds` names an unknown material
    UnknownMaterial {
        /// Part holding the reference
        part_id: String,
        /// The unknown material id
        material_id: String,
    },
    /// Parts that depend on each other in a loop
    DependencyCycle {
        /// Members of the loop, sorted
        members: Vec<String>,
    },
    /// No part is flagged non-removable
    MissingStructuralRoot,
    /// More than one part is flagged non-removable
    MultipleStructuralRoots {
        /// The non-removable parts
        part_ids: Vec<String>,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingConnection { part_id, missing } => {
                write!(f, "part '{part_id}' is connected to unknown part '{missing}'")
            }
            Self::DanglingDependsOn { part_id, missing } => {
                write!(f, "part '{part_id}' depends on unknown part '{missing}'")
            }
            Self::DanglingEdge { from, to, missing } => {
                write!(f, "edge {from} -> {to} references unknown part '{missing}'")
            }
            Self::UnknownMaterial {
                part_id,
                material_id,
            } => write!(f, "part '{part_id}' uses unknown material '{material_id}'"),
            Self::DependencyCycle { members } => {
                write!(f, "dependency cycle among [{}]", members.join(", "))
            }
            Self::MissingStructuralRoot => f.write_str("no non-removable structural root"),
            Self::MultipleStructuralRoots { part_ids } => {
                write!(f, "multiple non-removable parts: [{}]", part_ids.join(", "))
            }
        }
    }
}

/// Find every reference problem across the catalogs
///
/// Checks, in order: part connections, documented dependencies and
/// materials (per part, catalog order), dependency edge endpoints (edge
/// order), dependency cycles, and that exactly one part is
/// non-removable.
#[must_use]
pub fn check_integrity(
    parts: &PartCatalog,
    graph: &DependencyGraph,
    materials: &MaterialCatalog,
) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for part in parts.parts() {
        for other in &part.connected_part_ids {
            if !parts.contains(other) {
                issues.push(IntegrityIssue::DanglingConnection {
                    part_id: part.id.clone(),
                    missing: other.clone(),
                });
            }
        }
        for other in &part.depends_on_part_ids {
            if !parts.contains(other) {
                issues.push(IntegrityIssue::DanglingDependsOn {
                    part_id: part.id.clone(),
                    missing: other.clone(),
                });
            }
        }
        for material_id in &part.material_ids {
            if materials.get(material_id).is_none() {
                issues.push(IntegrityIssue::UnknownMaterial {
                    part_id: part.id.clone(),
                    material_id: material_id.clone(),
                });
            }
        }
    }

    for edge in graph.edges() {
        let mut reported: HashSet<&str> = HashSet::new();
        for endpoint in [&edge.from_part_id, &edge.to_part_id] {
            if !parts.contains(endpoint) && reported.insert(endpoint.as_str()) {
                issues.push(IntegrityIssue::DanglingEdge {
                    from: edge.from_part_id.clone(),
                    to: edge.to_part_id.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }

    issues.extend(
        graph
            .cycles()
            .into_iter()
            .map(|members| IntegrityIssue::DependencyCycle { members }),
    );

    let roots: Vec<String> = parts
        .parts()
        .iter()
        .filter(|p| !p.is_removable)
        .map(|p| p.id.clone())
        .collect();
    match roots.len() {
        0 => issues.push(IntegrityIssue::MissingStructuralRoot),
        1 => {}
        _ => issues.push(IntegrityIssue::MultipleStructuralRoots { part_ids: roots }),
    }

    issues
}

/// The three static catalogs loaded together
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    /// Parts catalog
    pub parts: PartCatalog,
    /// Dependency graph
    pub graph: DependencyGraph,
    /// Materials catalog
    pub materials: MaterialCatalog,
}

impl Catalogs {
    /// The bundled JetBot sample
    ///
    /// # Errors
    ///
    /// Fails only if the bundled documents are corrupt.
    pub fn sample() -> CatalogResult<Self> {
        Ok(Self {
            parts: sample::parts()?,
            graph: sample::dependency_graph()?,
            materials: sample::materials()?,
        })
    }

    /// Load the catalogs named by `config`
    ///
    /// Unset paths fall back to the bundled sample. Integrity issues are
    /// logged; with `config.strict` they fail the load.
    ///
    /// # Errors
    ///
    /// Returns I/O and decode errors, and [`CatalogError::Integrity`] in
    /// strict mode.
    pub fn load(config: &TwinConfig) -> CatalogResult<Self> {
        let parts = match &config.catalog.parts {
            Some(path) => PartCatalog::from_json(&read(path)?)?,
            None => sample::parts()?,
        };
        let graph = match &config.catalog.graph {
            Some(path) => DependencyGraph::from_json(&read(path)?)?,
            None => sample::dependency_graph()?,
        };
        let materials = match &config.catalog.materials {
            Some(path) => MaterialCatalog::from_json(&read(path)?)?,
            None => sample::materials()?,
        };

        let catalogs = Self {
            parts,
            graph,
            materials,
        };

        tracing::info!(
            parts = catalogs.parts.len(),
            edges = catalogs.graph.edge_count(),
            materials = catalogs.materials.len(),
            "catalogs loaded"
        );

        let issues = catalogs.check();
        for issue in &issues {
            tracing::warn!(%issue, "catalog integrity");
        }
        if config.strict && !issues.is_empty() {
            return Err(CatalogError::Integrity(issues));
        }

        Ok(catalogs)
    }

    /// Run [`check_integrity`] over these catalogs
    #[must_use]
    pub fn check(&self) -> Vec<IntegrityIssue> {
        check_integrity(&self.parts, &self.graph, &self.materials)
    }
}

fn read(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyEdge;
    use crate::types::{Criticality, DependencyType, PartCategory};

    fn part(id: &str) -> Part {
        Part::new(id, id, PartCategory::Electrical)
    }

    #[test]
    fn duplicate_part_ids_rejected() {
        let err = PartCatalog::new(vec![part("a"), part("b"), part("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePart(id) if id == "a"));
    }

    #[test]
    fn lookup_and_update() {
        let mut catalog = PartCatalog::new(vec![part("a"), part("b")]).unwrap();
        assert_eq!(catalog.get("b").map(|p| p.id.as_str()), Some("b"));
        assert!(!catalog.contains("c"));

        let updated = catalog
            .update(
                "a",
                PartUpdate {
                    criticality: Some(Criticality::Critical),
                    ..PartUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.criticality, Criticality::Critical);

        let err = catalog.update("zzz", PartUpdate::default()).unwrap_err();
        assert!(matches!(err, CatalogError::PartNotFound(_)));
    }

    #[test]
    fn integrity_reports_every_issue() {
        let parts = PartCatalog::new(vec![
            part("root").with_removable(false).with_connection("ghost"),
            part("a").with_material("mat-none"),
            part("b").with_removable(false),
        ])
        .unwrap();
        let graph = DependencyGraph::from_edges(vec![
            DependencyEdge::new("a", "b", DependencyType::Data),
            DependencyEdge::new("b", "a", DependencyType::Data),
            DependencyEdge::new("x", "x", DependencyType::Data),
        ]);

        let issues = check_integrity(&parts, &graph, &MaterialCatalog::default());
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::DanglingConnection {
                    part_id: "root".to_string(),
                    missing: "ghost".to_string(),
                },
                IntegrityIssue::UnknownMaterial {
                    part_id: "a".to_string(),
                    material_id: "mat-none".to_string(),
                },
                IntegrityIssue::DanglingEdge {
                    from: "x".to_string(),
                    to: "x".to_string(),
                    missing: "x".to_string(),
                },
                IntegrityIssue::DependencyCycle {
                    members: vec!["a".to_string(), "b".to_string()],
                },
                IntegrityIssue::DependencyCycle {
                    members: vec!["x".to_string()],
                },
                IntegrityIssue::MultipleStructuralRoots {
                    part_ids: vec!["root".to_string(), "b".to_string()],
                },
            ]
        );
    }

    #[test]
    fn missing_root_reported() {
        let parts = PartCatalog::new(vec![part("a")]).unwrap();
        let issues = check_integrity(&parts, &DependencyGraph::default(), &MaterialCatalog::default());
        assert_eq!(issues, vec![IntegrityIssue::MissingStructuralRoot]);
    }

    #[test]
    fn sample_catalogs_are_consistent() {
        let catalogs = Catalogs::sample().unwrap();
        assert_eq!(catalogs.parts.len(), 11);
        assert_eq!(catalogs.graph.edge_count(), 21);
        assert_eq!(catalogs.materials.len(), 10);
        assert!(catalogs.check().is_empty());
    }
}
