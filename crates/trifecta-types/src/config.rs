// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_DAMAGE_ABSORPTION_GAIN, DEFAULT_EFFICIENCY_CAP, DEFAULT_RESIDUAL_ENERGY_FRACTION,
};
use crate::error::{DrillError, DrillResult};
use crate::materials::MaterialProperties;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Top-level simulation configuration.
/// Every group falls back to the granite reference scenario when omitted
/// from JSON. Immutable once handed to a simulator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub acoustic: AcousticParams,
    pub laser: LaserParams,
    pub plasma: PlasmaParams,
    pub material: MaterialParams,
    pub geometry: GeometryParams,
    pub thermal: ThermalParams,
    pub run: RunParams,
}

/// Ultrasonic pre-stress array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcousticParams {
    /// Total acoustic power (W).
    pub power: f64,
    /// Carrier frequency (Hz).
    pub frequency: f64,
    /// Saturation level of the fatigue damage fraction.
    pub max_damage_fraction: f64,
    /// Characteristic stress-cycle count of the damage saturation curve.
    pub saturation_cycles: f64,
}

impl Default for AcousticParams {
    fn default() -> Self {
        AcousticParams {
            power: 760.0,
            frequency: 40e3,
            max_damage_fraction: 0.07,
            // Calibrated so the granite reference run saturates near 0.07 by 2 s.
            saturation_cycles: 1e4,
        }
    }
}

/// Pulsed blue laser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserParams {
    /// Average optical power (W).
    pub average_power: f64,
    /// Pulse repetition frequency (Hz).
    pub pulse_frequency: f64,
    /// Fraction of each period the laser is on, in (0, 1].
    pub duty_cycle: f64,
    /// Absorptivity of undamaged material.
    pub base_absorptivity: f64,
    /// Absorptivity gain per unit damage fraction.
    pub damage_absorption_gain: f64,
}

impl Default for LaserParams {
    fn default() -> Self {
        LaserParams {
            average_power: 5.0,
            pulse_frequency: 1000.0,
            duty_cycle: 0.1,
            base_absorptivity: 0.15,
            damage_absorption_gain: DEFAULT_DAMAGE_ABSORPTION_GAIN,
        }
    }
}

impl LaserParams {
    /// Peak power during a pulse (W).
    pub fn peak_power(&self) -> f64 {
        self.average_power / self.duty_cycle
    }

    /// Pulse duration (s).
    pub fn pulse_duration(&self) -> f64 {
        self.duty_cycle / self.pulse_frequency
    }

    /// Dark time between the end of one pulse and the start of the next (s).
    pub fn interpulse_interval(&self) -> f64 {
        (1.0 / self.pulse_frequency - self.pulse_duration()).max(0.0)
    }
}

/// Plasma torch and its coupling to the rock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasmaParams {
    /// Electrical torch power (W).
    pub power: f64,
    /// Electrical → arc conversion efficiency.
    pub arc_efficiency: f64,
    /// Arc → material transfer efficiency on cold material.
    pub base_transfer_efficiency: f64,
    /// Surface temperature at which the torch is fired (K).
    pub activation_temperature: f64,
    /// Maximum relative efficiency gain from pre-heating.
    pub preheat_gain: f64,
    /// Exponential rate of the pre-heating gain.
    pub preheat_rate: f64,
    /// Efficiency gain per unit damage fraction.
    pub damage_gain: f64,
    /// Hard ceiling on transfer efficiency.
    pub efficiency_cap: f64,
    /// Floor on residual specific energy, as a fraction of the undiscounted value.
    pub residual_energy_fraction: f64,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        PlasmaParams {
            power: 85.0,
            arc_efficiency: 0.80,
            base_transfer_efficiency: 0.40,
            activation_temperature: 800.0,
            preheat_gain: 1.0,
            preheat_rate: 3.0,
            damage_gain: 0.3,
            efficiency_cap: DEFAULT_EFFICIENCY_CAP,
            residual_energy_fraction: DEFAULT_RESIDUAL_ENERGY_FRACTION,
        }
    }
}

/// Resolved material bundle plus the ambient temperature of the work site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
    /// W/(m·K)
    pub thermal_conductivity: f64,
    /// K
    pub melting_point: f64,
    /// K
    pub vaporization_point: f64,
    /// J/m³
    pub specific_removal_energy: f64,
    /// 1/K
    pub thermal_expansion: f64,
    /// Pa
    pub youngs_modulus: f64,
    pub poissons_ratio: f64,
    /// Pa
    pub fracture_threshold: f64,
    pub emissivity: f64,
    /// m/hr
    pub mechanical_drilling_rate: f64,
    /// K
    pub ambient_temperature: f64,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self::from_properties(&MaterialProperties::granite(), 300.0)
    }
}

impl MaterialParams {
    pub fn from_properties(props: &MaterialProperties, ambient_temperature: f64) -> Self {
        MaterialParams {
            density: props.density,
            specific_heat: props.specific_heat,
            thermal_conductivity: props.thermal_conductivity,
            melting_point: props.melting_point,
            vaporization_point: props.vaporization_point,
            specific_removal_energy: props.specific_energy,
            thermal_expansion: props.thermal_expansion,
            youngs_modulus: props.youngs_modulus,
            poissons_ratio: props.poissons_ratio,
            fracture_threshold: props.fracture_threshold,
            emissivity: props.emissivity,
            mechanical_drilling_rate: props.mechanical_drilling_rate,
            ambient_temperature,
        }
    }

    /// Volumetric heat capacity ρ·c_p (J/(m³·K)).
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density * self.specific_heat
    }

    /// Thermal diffusivity k/(ρ·c_p) (m²/s).
    pub fn thermal_diffusivity(&self) -> f64 {
        self.thermal_conductivity / self.volumetric_heat_capacity()
    }
}

/// Spot and kerf geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Laser/plasma spot diameter (m).
    pub spot_diameter: f64,
    /// Cutting channel width (m).
    pub kerf_width: f64,
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams {
            spot_diameter: 1e-3,
            kerf_width: 1e-3,
        }
    }
}

impl GeometryParams {
    pub fn spot_radius(&self) -> f64 {
        self.spot_diameter / 2.0
    }

    /// π·(d/2)² (m²)
    pub fn spot_area(&self) -> f64 {
        PI * self.spot_radius().powi(2)
    }

    /// π·(w/2)² (m²)
    pub fn kerf_area(&self) -> f64 {
        PI * (self.kerf_width / 2.0).powi(2)
    }
}

/// Which laser heating model the integrator is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalMode {
    /// Continuous integration of the average absorbed power with conduction
    /// and radiation losses.
    #[default]
    Averaged,
    /// Discrete pulse train relaxing toward its closed-form steady state.
    PulseTrain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalParams {
    pub mode: ThermalMode,
    /// Depth over which the conductive gradient is taken (m).
    pub conduction_length: f64,
    /// Thickness of the laser-heated surface layer (m).
    pub heated_depth: f64,
}

impl Default for ThermalParams {
    fn default() -> Self {
        ThermalParams {
            mode: ThermalMode::Averaged,
            conduction_length: 0.01,
            // Calibrated so the granite reference run reaches 800 K within 0.5 s.
            heated_depth: 100e-6,
        }
    }
}

/// Fixed-step run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// s
    pub time_step: f64,
    /// s
    pub duration: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            time_step: 0.001,
            duration: 2.0,
        }
    }
}

/// Hardware safety envelope. Exceeding it is reported, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// K
    pub max_surface_temperature: f64,
    /// W
    pub max_acoustic_power: f64,
    /// W
    pub max_laser_power: f64,
    /// W
    pub max_plasma_power: f64,
    /// W
    pub max_total_power: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        SafetyLimits {
            max_surface_temperature: 1600.0,
            max_acoustic_power: 850.0,
            max_laser_power: 6.0,
            max_plasma_power: 100.0,
            max_total_power: 1000.0,
        }
    }
}

fn finite(name: &str, value: f64) -> DrillResult<()> {
    if !value.is_finite() {
        return Err(DrillError::InvalidConfiguration(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> DrillResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DrillError::InvalidConfiguration(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> DrillResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DrillError::InvalidConfiguration(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

fn fraction(name: &str, value: f64) -> DrillResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(DrillError::InvalidConfiguration(format!(
            "{name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn open_fraction(name: &str, value: f64) -> DrillResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(DrillError::InvalidConfiguration(format!(
            "{name} must lie in (0, 1], got {value}"
        )));
    }
    Ok(())
}

impl SimulationConfig {
    /// Load from a JSON file. Missing groups and fields take reference defaults.
    pub fn from_file(path: &str) -> DrillResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Reference configuration with the material group and base absorptivity
    /// taken from a resolved material bundle.
    pub fn for_material(props: &MaterialProperties) -> Self {
        let mut cfg = Self::default();
        cfg.material = MaterialParams::from_properties(props, cfg.material.ambient_temperature);
        cfg.laser.base_absorptivity = props.absorptivity;
        cfg
    }

    /// Sum of all installed source powers (W).
    pub fn total_power(&self) -> f64 {
        self.acoustic.power + self.laser.average_power + self.plasma.power
    }

    /// Reject parameters the models cannot evaluate.
    pub fn validate(&self) -> DrillResult<()> {
        let a = &self.acoustic;
        non_negative("acoustic.power", a.power)?;
        non_negative("acoustic.frequency", a.frequency)?;
        fraction("acoustic.max_damage_fraction", a.max_damage_fraction)?;
        positive("acoustic.saturation_cycles", a.saturation_cycles)?;

        let l = &self.laser;
        non_negative("laser.average_power", l.average_power)?;
        positive("laser.pulse_frequency", l.pulse_frequency)?;
        open_fraction("laser.duty_cycle", l.duty_cycle)?;
        fraction("laser.base_absorptivity", l.base_absorptivity)?;
        non_negative("laser.damage_absorption_gain", l.damage_absorption_gain)?;

        let p = &self.plasma;
        non_negative("plasma.power", p.power)?;
        fraction("plasma.arc_efficiency", p.arc_efficiency)?;
        fraction("plasma.base_transfer_efficiency", p.base_transfer_efficiency)?;
        finite("plasma.activation_temperature", p.activation_temperature)?;
        non_negative("plasma.preheat_gain", p.preheat_gain)?;
        non_negative("plasma.preheat_rate", p.preheat_rate)?;
        non_negative("plasma.damage_gain", p.damage_gain)?;
        open_fraction("plasma.efficiency_cap", p.efficiency_cap)?;
        open_fraction("plasma.residual_energy_fraction", p.residual_energy_fraction)?;

        let m = &self.material;
        positive("material.density", m.density)?;
        positive("material.specific_heat", m.specific_heat)?;
        non_negative("material.thermal_conductivity", m.thermal_conductivity)?;
        positive("material.ambient_temperature", m.ambient_temperature)?;
        positive("material.specific_removal_energy", m.specific_removal_energy)?;
        non_negative("material.thermal_expansion", m.thermal_expansion)?;
        non_negative("material.youngs_modulus", m.youngs_modulus)?;
        positive("material.fracture_threshold", m.fracture_threshold)?;
        fraction("material.emissivity", m.emissivity)?;
        non_negative("material.mechanical_drilling_rate", m.mechanical_drilling_rate)?;
        finite("material.poissons_ratio", m.poissons_ratio)?;
        if !(0.0..0.5).contains(&m.poissons_ratio) {
            return Err(DrillError::InvalidConfiguration(format!(
                "material.poissons_ratio must lie in [0, 0.5), got {}",
                m.poissons_ratio
            )));
        }
        finite("material.melting_point", m.melting_point)?;
        finite("material.vaporization_point", m.vaporization_point)?;

        positive("geometry.spot_diameter", self.geometry.spot_diameter)?;
        positive("geometry.kerf_width", self.geometry.kerf_width)?;
        positive("thermal.conduction_length", self.thermal.conduction_length)?;
        positive("thermal.heated_depth", self.thermal.heated_depth)?;
        positive("run.time_step", self.run.time_step)?;
        positive("run.duration", self.run.duration)?;
        Ok(())
    }

    /// Human-readable list of safety-envelope violations (empty when compliant).
    pub fn safety_violations(&self, limits: &SafetyLimits) -> Vec<String> {
        let mut out = Vec::new();
        let checks = [
            ("acoustic power", self.acoustic.power, limits.max_acoustic_power),
            ("laser power", self.laser.average_power, limits.max_laser_power),
            ("plasma power", self.plasma.power, limits.max_plasma_power),
            ("total power", self.total_power(), limits.max_total_power),
        ];
        for (label, value, limit) in checks {
            if value > limit {
                out.push(format!("{label} {value:.1} W exceeds limit {limit:.1} W"));
            }
        }
        out
    }
}
