//! Robot parts
//!
//! A [`Part`] is one physical or electrical component of the robot. Parts
//! are loaded once into a [`crate::PartCatalog`]; only their descriptive
//! fields may change afterwards, through [`PartUpdate`].

use crate::types::{Criticality, PartCategory};
use serde::{Deserialize, Serialize};

/// A single component of the robot assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Unique, stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Functional category
    pub category: PartCategory,
    /// What the part does for the robot
    #[serde(default)]
    pub function_description: String,
    /// References into the material catalog
    #[serde(default)]
    pub material_ids: Vec<String>,
    /// Electrical resistance of the part
    pub electrical_resistance: ElectricalResistance,
    /// Importance rank
    pub criticality: Criticality,
    /// Weight in grams
    pub weight_grams: f64,
    /// Bounding dimensions
    pub dimensions: Dimensions,
    /// Parts this one physically touches (navigation only)
    #[serde(default)]
    pub connected_part_ids: Vec<String>,
    /// Parts this one is documented to depend on
    #[serde(default)]
    pub depends_on_part_ids: Vec<String>,
    /// Whether the part may be detached
    pub is_removable: bool,
}

impl Part {
    /// Create a part with neutral physical attributes
    ///
    /// # Example
    ///
    /// ```
    /// use twin_core::{Criticality, Part, PartCategory};
    ///
    /// let part = Part::new("gripper", "Gripper", PartCategory::Locomotion)
    ///     .with_criticality(Criticality::High)
    ///     .with_weight(42.0);
    ///
    /// assert_eq!(part.id, "gripper");
    /// assert!(part.is_removable);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: PartCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            function_description: String::new(),
            material_ids: Vec::new(),
            electrical_resistance: ElectricalResistance::default(),
            criticality: Criticality::Medium,
            weight_grams: 0.0,
            dimensions: Dimensions::default(),
            connected_part_ids: Vec::new(),
            depends_on_part_ids: Vec::new(),
            is_removable: true,
        }
    }

    /// Set description (builder pattern)
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set criticality (builder pattern)
    #[must_use]
    pub fn with_criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = criticality;
        self
    }

    /// Set weight in grams (builder pattern)
    #[must_use]
    pub fn with_weight(mut self, grams: f64) -> Self {
        self.weight_grams = grams;
        self
    }

    /// Add a material reference (builder pattern)
    #[must_use]
    pub fn with_material(mut self, material_id: impl Into<String>) -> Self {
        self.material_ids.push(material_id.into());
        self
    }

    /// Add a physical connection (builder pattern)
    #[must_use]
    pub fn with_connection(mut self, part_id: impl Into<String>) -> Self {
        self.connected_part_ids.push(part_id.into());
        self
    }

    /// Set removability (builder pattern)
    #[must_use]
    pub fn with_removable(mut self, removable: bool) -> Self {
        self.is_removable = removable;
        self
    }

    /// Apply a partial update to the descriptive fields
    pub fn apply(&mut self, update: PartUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(function_description) = update.function_description {
            self.function_description = function_description;
        }
        if let Some(criticality) = update.criticality {
            self.criticality = criticality;
        }
        if let Some(weight) = update.weight_grams {
            self.weight_grams = weight;
        }
        if let Some(removable) = update.is_removable {
            self.is_removable = removable;
        }
    }
}

/// Electrical resistance and whether the part carries current
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalResistance {
    /// Resistance in ohms
    pub value_ohms: f64,
    /// Part lies on a current-carrying path
    pub is_on_electrical_path: bool,
}

/// Bounding dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Length
    pub length_mm: f64,
    /// Width
    pub width_mm: f64,
    /// Height
    pub height_mm: f64,
}

/// Partial update of a part's mutable fields
///
/// The id is never updatable. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New function text
    pub function_description: Option<String>,
    /// New criticality
    pub criticality: Option<Criticality>,
    /// New weight in grams
    pub weight_grams: Option<f64>,
    /// New removability flag
    pub is_removable: Option<bool>,
}

impl PartUpdate {
    /// True when the update changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
