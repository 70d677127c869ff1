//! Closed enumerations shared across the twin model
//!
//! Every enum serializes to the lowercase (or kebab-case) spelling used by
//! the JSON catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional category of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    /// Frames, mounts and passive supports
    Structural,
    /// Compute boards
    Compute,
    /// Batteries and regulators
    Power,
    /// Wheels and drive train
    Locomotion,
    /// Cameras and other sensors
    Sensor,
    /// Radios and antennas
    Communication,
    /// Driver boards and other active electronics
    Electrical,
    /// Cable looms
    Wiring,
}

impl PartCategory {
    /// All categories in declaration order
    pub const ALL: [Self; 8] = [
        Self::Structural,
        Self::Compute,
        Self::Power,
        Self::Locomotion,
        Self::Sensor,
        Self::Communication,
        Self::Electrical,
        Self::Wiring,
    ];

    /// Catalog spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Compute => "compute",
            Self::Power => "power",
            Self::Locomotion => "locomotion",
            Self::Sensor => "sensor",
            Self::Communication => "communication",
            Self::Electrical => "electrical",
            Self::Wiring => "wiring",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown part category '{s}'"))
    }
}

/// Importance of a part, totally ordered `Low < Medium < High < Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Nice to have
    Low,
    /// Degrades a secondary capability
    Medium,
    /// Degrades a primary capability
    High,
    /// Robot cannot operate without it
    Critical,
}

impl Criticality {
    /// Numeric rank used for explode ordering
    #[inline]
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Catalog spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of dependency between two parts
///
/// All kinds propagate failure equally for impact purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// Supplies electrical power
    Power,
    /// Carries signals or data
    Data,
    /// Provides mounting or support
    Structural,
    /// Transmits torque or motion
    Mechanical,
}

impl DependencyType {
    /// Catalog spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Data => "data",
            Self::Structural => "structural",
            Self::Mechanical => "mechanical",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome class of removing a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Nothing downstream is affected
    None,
    /// Some downstream parts are affected, none critical
    Degraded,
    /// At least one critical part is affected
    NonFunctional,
}

impl Severity {
    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Degraded => "degraded",
            Self::NonFunctional => "non-functional",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criticality_is_totally_ordered() {
        assert!(Criticality::Low < Criticality::Medium);
        assert!(Criticality::Medium < Criticality::High);
        assert!(Criticality::High < Criticality::Critical);
        assert_eq!(Criticality::Critical.rank(), 3);
        assert_eq!(Criticality::Low.rank(), 0);
    }

    #[test]
    fn severity_serializes_kebab_case() {
        let json = serde_json::to_string(&Severity::NonFunctional).unwrap();
        assert_eq!(json, "\"non-functional\"");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Sensor".parse::<PartCategory>(), Ok(PartCategory::Sensor));
        assert!("gripper".parse::<PartCategory>().is_err());
    }

    #[test]
    fn dependency_type_round_trips_catalog_spelling() {
        let ty: DependencyType = serde_json::from_str("\"mechanical\"").unwrap();
        assert_eq!(ty, DependencyType::Mechanical);
        assert_eq!(ty.to_string(), "mechanical");
    }
}
