//! Lookups, filters and aggregates over a parts list
//!
//! Every function is pure. Ids that resolve to nothing are dropped from
//! derived results rather than reported; use
//! [`crate::catalog::check_integrity`] for a strict view.

use crate::material::Material;
use crate::part::Part;
use crate::types::{Criticality, PartCategory};
use std::collections::{HashMap, HashSet};

/// First part with the given id
#[must_use]
pub fn part_by_id<'p>(parts: &'p [Part], id: &str) -> Option<&'p Part> {
    parts.iter().find(|p| p.id == id)
}

/// Parts in a category
#[must_use]
pub fn parts_by_category(parts: &[Part], category: PartCategory) -> Vec<&Part> {
    parts.iter().filter(|p| p.category == category).collect()
}

/// Parts with exactly the given criticality
#[must_use]
pub fn parts_by_criticality(parts: &[Part], criticality: Criticality) -> Vec<&Part> {
    parts.iter().filter(|p| p.criticality == criticality).collect()
}

/// Parts flagged removable
#[must_use]
pub fn removable_parts(parts: &[Part]) -> Vec<&Part> {
    parts.iter().filter(|p| p.is_removable).collect()
}

/// Case-insensitive substring search over name and description
///
/// A blank query returns every part unchanged.
///
/// # Example
///
/// ```
/// use twin_core::query::search_parts;
/// use twin_core::{Part, PartCategory};
///
/// let parts = vec![Part::new("jetson-nano", "NVIDIA Jetson Nano", PartCategory::Compute)];
/// assert_eq!(search_parts(&parts, "JETSON").len(), 1);
/// assert_eq!(search_parts(&parts, "   ").len(), 1);
/// ```
#[must_use]
pub fn search_parts<'p>(parts: &'p [Part], query: &str) -> Vec<&'p Part> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return parts.iter().collect();
    }
    parts
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sum of part weights in grams
#[must_use]
pub fn total_weight<'p>(parts: impl IntoIterator<Item = &'p Part>) -> f64 {
    parts.into_iter().map(|p| p.weight_grams).sum()
}

/// Parts physically connected to `part_id`, in catalog order
///
/// Unknown `part_id` yields nothing; connection ids with no matching part
/// are skipped.
#[must_use]
pub fn connected_parts<'p>(parts: &'p [Part], part_id: &str) -> Vec<&'p Part> {
    let Some(part) = part_by_id(parts, part_id) else {
        return Vec::new();
    };
    let wanted: HashSet<&str> = part.connected_part_ids.iter().map(String::as_str).collect();
    parts
        .iter()
        .filter(|p| wanted.contains(p.id.as_str()))
        .collect()
}

/// Resolve a part's material ids, skipping unknown ones
#[must_use]
pub fn part_materials<'m>(part: &Part, materials: &'m HashMap<String, Material>) -> Vec<&'m Material> {
    part.material_ids
        .iter()
        .filter_map(|id| materials.get(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{ElectricalClass, ElectricalConductivity, ThermalClass, ThermalConductivity};
    use pretty_assertions::assert_eq;

    fn ids<'a>(parts: &[&'a Part]) -> Vec<&'a str> {
        parts.iter().map(|p| p.id.as_str()).collect()
    }

    fn catalog() -> Vec<Part> {
        vec![
            Part::new("chassis", "Chassis", PartCategory::Structural)
                .with_criticality(Criticality::Critical)
                .with_weight(320.0)
                .with_connection("wheel")
                .with_connection("ghost")
                .with_connection("cam")
                .with_removable(false),
            Part::new("cam", "Camera", PartCategory::Sensor)
                .with_description("Wide-angle CSI module")
                .with_criticality(Criticality::Critical)
                .with_weight(24.0),
            Part::new("wheel", "Wheel", PartCategory::Locomotion)
                .with_criticality(Criticality::High)
                .with_weight(45.5),
        ]
    }

    #[test]
    fn lookup_by_id() {
        let parts = catalog();
        assert_eq!(part_by_id(&parts, "cam").map(|p| p.name.as_str()), Some("Camera"));
        assert!(part_by_id(&parts, "missing").is_none());
    }

    #[test]
    fn filters() {
        let parts = catalog();
        assert_eq!(ids(&parts_by_category(&parts, PartCategory::Sensor)), vec!["cam"]);
        assert_eq!(
            ids(&parts_by_criticality(&parts, Criticality::Critical)),
            vec!["chassis", "cam"]
        );
        assert_eq!(ids(&removable_parts(&parts)), vec!["cam", "wheel"]);
    }

    #[test]
    fn search_matches_name_or_description() {
        let parts = catalog();
        assert_eq!(ids(&search_parts(&parts, "wide-ANGLE")), vec!["cam"]);
        assert_eq!(ids(&search_parts(&parts, " wheel ")), vec!["wheel"]);
        assert!(search_parts(&parts, "gripper").is_empty());
        assert_eq!(search_parts(&parts, "").len(), parts.len());
    }

    #[test]
    fn weight_sums() {
        let parts = catalog();
        assert!((total_weight(&parts) - 389.5).abs() < 1e-9);
        assert!((total_weight(removable_parts(&parts)) - 69.5).abs() < 1e-9);
        assert!(total_weight(std::iter::empty()).abs() < f64::EPSILON);
    }

    #[test]
    fn connected_parts_skip_unknown_ids_and_keep_catalog_order() {
        let parts = catalog();
        assert_eq!(ids(&connected_parts(&parts, "chassis")), vec!["cam", "wheel"]);
        assert!(connected_parts(&parts, "missing").is_empty());
    }

    #[test]
    fn materials_skip_unknown_ids() {
        let copper = Material {
            id: "mat-copper".to_string(),
            name: "Copper".to_string(),
            electrical_conductivity: ElectricalConductivity {
                value_siemens_per_meter: 5.96e7,
                classification: ElectricalClass::Conductor,
            },
            thermal_conductivity: ThermalConductivity {
                value_watts_per_meter_kelvin: 401.0,
                classification: ThermalClass::High,
            },
            density_kg_per_m3: 8960.0,
        };
        let materials = HashMap::from([(copper.id.clone(), copper)]);
        let part = Part::new("cable", "Cable", PartCategory::Wiring)
            .with_material("mat-unknown")
            .with_material("mat-copper");

        let resolved = part_materials(&part, &materials);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Copper");
    }
}
