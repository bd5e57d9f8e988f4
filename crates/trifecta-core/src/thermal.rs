// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Laser Heating
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lumped surface-temperature models for pulsed laser heating.
//!
//! Two interchangeable models share the [`ThermalModel`] contract:
//! - [`AveragedHeating`]: explicit Euler on average absorbed power minus
//!   conduction and grey-body radiation losses.
//! - [`PulseTrainHeating`]: discrete pulse train with exponential cooling
//!   between pulses, advanced in closed form.
//!
//! Acoustic damage raises absorptivity: α_eff = α_base·(1 + k·f_damage).

use trifecta_types::config::{SimulationConfig, ThermalMode};
use trifecta_types::constants::STEFAN_BOLTZMANN;

/// Absorbed-energy → temperature strategy.
pub trait ThermalModel: Send + Sync {
    /// Surface temperature after `dt` seconds starting from `temperature`.
    /// Returns `temperature` unchanged when `dt <= 0`.
    fn step_temperature(&self, temperature: f64, damage_fraction: f64, dt: f64) -> f64;

    /// Floor below which the surface never cools.
    fn ambient_temperature(&self) -> f64;
}

/// Build the thermal model selected by `config.thermal.mode`.
pub fn build_thermal_model(config: &SimulationConfig) -> Box<dyn ThermalModel> {
    match config.thermal.mode {
        ThermalMode::Averaged => Box::new(AveragedHeating::new(config)),
        ThermalMode::PulseTrain => Box::new(PulseTrainHeating::new(config)),
    }
}

/// Damage-enhanced absorptivity.
pub fn effective_absorptivity(base: f64, damage_gain: f64, damage_fraction: f64) -> f64 {
    base * (1.0 + damage_gain * damage_fraction)
}

/// Averaged-power heating of a thin surface slab.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedHeating {
    pub base_absorptivity: f64,
    pub damage_absorption_gain: f64,
    /// W
    pub average_power: f64,
    /// W/(m·K)
    pub thermal_conductivity: f64,
    pub emissivity: f64,
    /// m²
    pub spot_area: f64,
    /// m
    pub conduction_length: f64,
    /// m
    pub heated_depth: f64,
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
    /// K
    pub ambient_temperature: f64,
}

impl AveragedHeating {
    pub fn new(config: &SimulationConfig) -> Self {
        AveragedHeating {
            base_absorptivity: config.laser.base_absorptivity,
            damage_absorption_gain: config.laser.damage_absorption_gain,
            average_power: config.laser.average_power,
            thermal_conductivity: config.material.thermal_conductivity,
            emissivity: config.material.emissivity,
            spot_area: config.geometry.spot_area(),
            conduction_length: config.thermal.conduction_length,
            heated_depth: config.thermal.heated_depth,
            density: config.material.density,
            specific_heat: config.material.specific_heat,
            ambient_temperature: config.material.ambient_temperature,
        }
    }

    /// Power absorbed at the surface [W].
    pub fn absorbed_power(&self, damage_fraction: f64) -> f64 {
        effective_absorptivity(
            self.base_absorptivity,
            self.damage_absorption_gain,
            damage_fraction,
        ) * self.average_power
    }

    /// Conduction into the bulk [W].
    pub fn conductive_loss(&self, temperature: f64) -> f64 {
        self.thermal_conductivity * self.spot_area * (temperature - self.ambient_temperature)
            / self.conduction_length
    }

    /// Grey-body radiation [W].
    pub fn radiative_loss(&self, temperature: f64) -> f64 {
        self.emissivity
            * STEFAN_BOLTZMANN
            * self.spot_area
            * (temperature.powi(4) - self.ambient_temperature.powi(4))
    }

    /// Absorbed minus lost power [W].
    pub fn net_power(&self, temperature: f64, damage_fraction: f64) -> f64 {
        self.absorbed_power(damage_fraction)
            - self.conductive_loss(temperature)
            - self.radiative_loss(temperature)
    }

    /// Heat capacity of the heated slab [J/K].
    pub fn heat_capacity(&self) -> f64 {
        self.density * self.spot_area * self.heated_depth * self.specific_heat
    }
}

impl ThermalModel for AveragedHeating {
    fn step_temperature(&self, temperature: f64, damage_fraction: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            return temperature;
        }
        let next =
            temperature + self.net_power(temperature, damage_fraction) * dt / self.heat_capacity();
        // Calibration floor: the explicit step may overshoot below ambient.
        next.max(self.ambient_temperature)
    }

    fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }
}

/// Discrete pulse train with diffusive cooling between pulses.
///
/// Per-pulse rise:   ΔT_p = α_eff·P_peak·t_p / (ρ·c_p·A·d)
/// Time constant:    τ = r² / (4·D),  D = k/(ρ·c_p)
/// Cooling factor:   β = exp(−Δt_dark/τ)
/// Steady state:     T_ss = T_amb + ΔT_p / (1 − β)
#[derive(Debug, Clone, PartialEq)]
pub struct PulseTrainHeating {
    pub base_absorptivity: f64,
    pub damage_absorption_gain: f64,
    /// W
    pub peak_power: f64,
    /// s
    pub pulse_duration: f64,
    /// Hz
    pub pulse_frequency: f64,
    /// s
    pub interpulse_interval: f64,
    /// m
    pub spot_radius: f64,
    /// m²
    pub spot_area: f64,
    /// m
    pub heated_depth: f64,
    /// J/(m³·K)
    pub volumetric_heat_capacity: f64,
    /// m²/s
    pub thermal_diffusivity: f64,
    /// K
    pub ambient_temperature: f64,
}

impl PulseTrainHeating {
    pub fn new(config: &SimulationConfig) -> Self {
        PulseTrainHeating {
            base_absorptivity: config.laser.base_absorptivity,
            damage_absorption_gain: config.laser.damage_absorption_gain,
            peak_power: config.laser.peak_power(),
            pulse_duration: config.laser.pulse_duration(),
            pulse_frequency: config.laser.pulse_frequency,
            interpulse_interval: config.laser.interpulse_interval(),
            spot_radius: config.geometry.spot_radius(),
            spot_area: config.geometry.spot_area(),
            heated_depth: config.thermal.heated_depth,
            volumetric_heat_capacity: config.material.volumetric_heat_capacity(),
            thermal_diffusivity: config.material.thermal_diffusivity(),
            ambient_temperature: config.material.ambient_temperature,
        }
    }

    /// Temperature rise deposited by one pulse [K].
    pub fn single_pulse_rise(&self, damage_fraction: f64) -> f64 {
        let alpha = effective_absorptivity(
            self.base_absorptivity,
            self.damage_absorption_gain,
            damage_fraction,
        );
        let energy = alpha * self.peak_power * self.pulse_duration;
        let heated_volume = self.spot_area * self.heated_depth;
        energy / (self.volumetric_heat_capacity * heated_volume)
    }

    /// Diffusive time constant of the spot [s]. Infinite for a perfect insulator.
    pub fn time_constant(&self) -> f64 {
        if self.thermal_diffusivity <= 0.0 {
            return f64::INFINITY;
        }
        self.spot_radius.powi(2) / (4.0 * self.thermal_diffusivity)
    }

    /// Dark time over the time constant; β = exp(−x).
    fn cooling_exponent(&self) -> f64 {
        self.interpulse_interval / self.time_constant()
    }

    /// Fraction of the excess temperature surviving one dark interval.
    pub fn cooling_factor(&self) -> f64 {
        (-self.cooling_exponent()).exp()
    }

    /// Closed-form steady-state temperature of an infinite train [K].
    /// Infinite when there is no cooling between pulses.
    pub fn steady_state_temperature(&self, damage_fraction: f64) -> f64 {
        let x = self.cooling_exponent();
        if x <= 0.0 {
            return f64::INFINITY;
        }
        self.ambient_temperature + self.single_pulse_rise(damage_fraction) / -(-x).exp_m1()
    }

    /// Post-pulse peak temperatures of the first `n_pulses` pulses from ambient.
    pub fn pulse_train_profile(&self, n_pulses: usize, damage_fraction: f64) -> Vec<f64> {
        let rise = self.single_pulse_rise(damage_fraction);
        let beta = self.cooling_factor();
        let mut out = Vec::with_capacity(n_pulses);
        let mut excess = 0.0;
        for _ in 0..n_pulses {
            excess = excess * beta + rise;
            out.push(self.ambient_temperature + excess);
        }
        out
    }
}

impl ThermalModel for PulseTrainHeating {
    fn step_temperature(&self, temperature: f64, damage_fraction: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            return temperature;
        }
        // Fractional pulse count keeps the recursion exact for integer n and
        // smooth in between.
        let n = dt * self.pulse_frequency;
        let x = self.cooling_exponent();
        let decay = (-n * x).exp();
        let accumulation = if x > 0.0 {
            (-n * x).exp_m1() / (-x).exp_m1()
        } else {
            n
        };
        let excess = (temperature - self.ambient_temperature) * decay
            + self.single_pulse_rise(damage_fraction) * accumulation;
        (self.ambient_temperature + excess).max(self.ambient_temperature)
    }

    fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }
}
