// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rock and construction-material property bundles.
//!
//! The simulator consumes exactly one resolved bundle per run; lookups are
//! case-insensitive and a miss is a configuration error.

use crate::error::{DrillError, DrillResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physical properties of one target material (SI units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub name: String,
    #[serde(default)]
    pub description: String,

    // Thermal
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
    /// W/(m·K)
    pub thermal_conductivity: f64,
    /// m²/s. Derived from k/(ρ·c_p) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_diffusivity: Option<f64>,
    /// K
    pub melting_point: f64,
    /// K
    pub vaporization_point: f64,

    // Mechanical
    /// Pa
    pub youngs_modulus: f64,
    pub poissons_ratio: f64,
    /// 1/K
    pub thermal_expansion: f64,

    // Optical
    /// Absorptivity at the 445 nm laser line.
    pub absorptivity: f64,
    pub emissivity: f64,

    // Acoustic
    /// P-wave velocity (m/s).
    pub p_wave_velocity: f64,
    /// Pa·s/m. Derived from ρ·v_p when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acoustic_impedance: Option<f64>,

    // Strength
    /// Pa
    pub compressive_strength: f64,
    /// Pa
    pub tensile_strength: f64,
    /// Microcrack initiation stress (Pa).
    pub fracture_threshold: f64,

    // Removal
    /// Energy to remove a unit volume (J/m³).
    pub specific_energy: f64,
    /// Typical mechanical drilling rate (m/hr).
    pub mechanical_drilling_rate: f64,
}

impl MaterialProperties {
    pub fn granite() -> Self {
        MaterialProperties {
            name: "granite".into(),
            description: "Common igneous rock, primary target".into(),
            density: 2700.0,
            specific_heat: 800.0,
            thermal_conductivity: 3.0,
            thermal_diffusivity: Some(1.39e-6),
            melting_point: 1500.0,
            vaporization_point: 3000.0,
            youngs_modulus: 50e9,
            poissons_ratio: 0.25,
            thermal_expansion: 8e-6,
            absorptivity: 0.15,
            emissivity: 0.90,
            p_wave_velocity: 5000.0,
            acoustic_impedance: Some(13.5e6),
            compressive_strength: 200e6,
            tensile_strength: 15e6,
            fracture_threshold: 100e6,
            specific_energy: 7.36e9,
            mechanical_drilling_rate: 2.0,
        }
    }

    pub fn basalt() -> Self {
        MaterialProperties {
            name: "basalt".into(),
            description: "Volcanic rock, slightly softer than granite".into(),
            density: 2900.0,
            specific_heat: 850.0,
            thermal_conductivity: 2.0,
            thermal_diffusivity: Some(0.81e-6),
            melting_point: 1473.0,
            vaporization_point: 2900.0,
            youngs_modulus: 60e9,
            poissons_ratio: 0.28,
            thermal_expansion: 5e-6,
            absorptivity: 0.20,
            emissivity: 0.92,
            p_wave_velocity: 5500.0,
            acoustic_impedance: Some(16.0e6),
            compressive_strength: 250e6,
            tensile_strength: 20e6,
            fracture_threshold: 120e6,
            specific_energy: 6.5e9,
            mechanical_drilling_rate: 2.5,
        }
    }

    pub fn limestone() -> Self {
        MaterialProperties {
            name: "limestone".into(),
            description: "Sedimentary rock, softer than granite".into(),
            density: 2400.0,
            specific_heat: 900.0,
            thermal_conductivity: 2.5,
            thermal_diffusivity: Some(1.16e-6),
            melting_point: 1200.0,
            vaporization_point: 2600.0,
            youngs_modulus: 30e9,
            poissons_ratio: 0.22,
            thermal_expansion: 6e-6,
            absorptivity: 0.10,
            emissivity: 0.88,
            p_wave_velocity: 4000.0,
            acoustic_impedance: Some(9.6e6),
            compressive_strength: 100e6,
            tensile_strength: 8e6,
            fracture_threshold: 50e6,
            specific_energy: 4.0e9,
            mechanical_drilling_rate: 4.0,
        }
    }

    pub fn sandstone() -> Self {
        MaterialProperties {
            name: "sandstone".into(),
            description: "Sedimentary rock, soft and porous".into(),
            density: 2200.0,
            specific_heat: 920.0,
            thermal_conductivity: 2.0,
            thermal_diffusivity: Some(0.99e-6),
            melting_point: 1100.0,
            vaporization_point: 2500.0,
            youngs_modulus: 15e9,
            poissons_ratio: 0.20,
            thermal_expansion: 10e-6,
            absorptivity: 0.12,
            emissivity: 0.85,
            p_wave_velocity: 3500.0,
            acoustic_impedance: Some(7.7e6),
            compressive_strength: 70e6,
            tensile_strength: 5e6,
            fracture_threshold: 35e6,
            specific_energy: 3.0e9,
            mechanical_drilling_rate: 6.0,
        }
    }

    pub fn concrete() -> Self {
        MaterialProperties {
            name: "concrete".into(),
            description: "Common construction material".into(),
            density: 2400.0,
            specific_heat: 880.0,
            thermal_conductivity: 1.7,
            thermal_diffusivity: Some(0.80e-6),
            melting_point: 1400.0,
            vaporization_point: 2700.0,
            youngs_modulus: 30e9,
            poissons_ratio: 0.20,
            thermal_expansion: 12e-6,
            absorptivity: 0.18,
            emissivity: 0.90,
            p_wave_velocity: 4200.0,
            acoustic_impedance: Some(10.1e6),
            compressive_strength: 40e6,
            tensile_strength: 4e6,
            fracture_threshold: 20e6,
            specific_energy: 3.5e9,
            mechanical_drilling_rate: 5.0,
        }
    }

    pub fn marble() -> Self {
        MaterialProperties {
            name: "marble".into(),
            description: "Metamorphic rock, crystalline".into(),
            density: 2700.0,
            specific_heat: 880.0,
            thermal_conductivity: 2.8,
            thermal_diffusivity: Some(1.18e-6),
            melting_point: 1200.0,
            vaporization_point: 2600.0,
            youngs_modulus: 55e9,
            poissons_ratio: 0.26,
            thermal_expansion: 5e-6,
            absorptivity: 0.08,
            emissivity: 0.92,
            p_wave_velocity: 5200.0,
            acoustic_impedance: Some(14.0e6),
            compressive_strength: 130e6,
            tensile_strength: 10e6,
            fracture_threshold: 65e6,
            specific_energy: 5.0e9,
            mechanical_drilling_rate: 3.5,
        }
    }

    /// Thermal diffusivity (m²/s): tabulated value, else k/(ρ·c_p).
    pub fn thermal_diffusivity(&self) -> f64 {
        self.thermal_diffusivity
            .unwrap_or_else(|| self.thermal_conductivity / (self.density * self.specific_heat))
    }

    /// Acoustic impedance (Pa·s/m): tabulated value, else ρ·v_p.
    pub fn acoustic_impedance(&self) -> f64 {
        self.acoustic_impedance
            .unwrap_or(self.density * self.p_wave_velocity)
    }
}

/// Named, case-insensitive collection of material bundles.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: BTreeMap<String, MaterialProperties>,
}

impl MaterialDatabase {
    /// Empty database.
    pub fn empty() -> Self {
        MaterialDatabase {
            materials: BTreeMap::new(),
        }
    }

    /// Database holding the six built-in materials.
    pub fn builtin() -> Self {
        let mut db = Self::empty();
        for props in [
            MaterialProperties::granite(),
            MaterialProperties::basalt(),
            MaterialProperties::limestone(),
            MaterialProperties::sandstone(),
            MaterialProperties::concrete(),
            MaterialProperties::marble(),
        ] {
            db.insert(props);
        }
        db
    }

    /// Add or replace a bundle, keyed by its lowercased name.
    pub fn insert(&mut self, props: MaterialProperties) {
        self.materials.insert(props.name.to_lowercase(), props);
    }

    /// Merge bundles from a JSON array of material objects.
    /// Returns the number of bundles loaded.
    pub fn load_file(&mut self, path: &str) -> DrillResult<usize> {
        let contents = std::fs::read_to_string(path)?;
        let loaded: Vec<MaterialProperties> = serde_json::from_str(&contents)?;
        let count = loaded.len();
        for props in loaded {
            self.insert(props);
        }
        Ok(count)
    }

    /// Resolve a bundle by name, ignoring case.
    pub fn get(&self, name: &str) -> DrillResult<&MaterialProperties> {
        self.materials
            .get(&name.to_lowercase())
            .ok_or_else(|| DrillError::UnknownMaterial {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Sorted lowercase names.
    pub fn names(&self) -> Vec<&str> {
        self.materials.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::builtin()
    }
}
