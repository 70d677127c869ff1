//! Material reference data

use serde::{Deserialize, Serialize};

/// A substance parts are made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Electrical conductivity
    pub electrical_conductivity: ElectricalConductivity,
    /// Thermal conductivity
    pub thermal_conductivity: ThermalConductivity,
    /// Density in kg/m³
    #[serde(rename = "densityKgPerM3")]
    pub density_kg_per_m3: f64,
}

/// Electrical conductivity value and class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalConductivity {
    /// Siemens per metre
    pub value_siemens_per_meter: f64,
    /// Coarse class
    pub classification: ElectricalClass,
}

/// Thermal conductivity value and class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalConductivity {
    /// Watts per metre-kelvin
    pub value_watts_per_meter_kelvin: f64,
    /// Coarse class
    pub classification: ThermalClass,
}

/// Electrical conductivity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricalClass {
    /// Metals
    Conductor,
    /// Doped silicon and similar
    Semiconductor,
    /// Plastics, glass, rubber
    Insulator,
}

/// Thermal conductivity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalClass {
    /// Good heat conductor
    High,
    /// Moderate heat conductor
    Medium,
    /// Poor heat conductor
    Low,
}
