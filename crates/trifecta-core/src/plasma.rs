// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Plasma Removal
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Threshold-gated plasma material removal.
//!
//! Transfer efficiency improves with pre-heating (impedance matching) and
//! with acoustic damage (surface roughness); pre-heating also discounts the
//! energy still needed to remove a unit volume.

use trifecta_types::config::SimulationConfig;

/// (temperature, damage) → removal strategy.
pub trait RemovalModel: Send + Sync {
    /// Whether the torch is firing at this surface temperature.
    fn is_active(&self, temperature: f64) -> bool;

    /// Arc → material transfer efficiency.
    fn transfer_efficiency(&self, temperature: f64, damage_fraction: f64) -> f64;

    /// Volume removal rate [m³/s]; zero when inactive.
    fn volume_removal_rate(&self, temperature: f64, damage_fraction: f64) -> f64;

    /// Linear drilling rate along the kerf [m/s].
    fn linear_rate(&self, temperature: f64, damage_fraction: f64) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlasmaRemovalModel {
    /// W
    pub power: f64,
    pub arc_efficiency: f64,
    pub base_transfer_efficiency: f64,
    /// K
    pub activation_temperature: f64,
    pub preheat_gain: f64,
    pub preheat_rate: f64,
    pub damage_gain: f64,
    pub efficiency_cap: f64,
    pub residual_energy_fraction: f64,
    /// K
    pub melting_point: f64,
    /// K
    pub ambient_temperature: f64,
    /// J/m³
    pub specific_removal_energy: f64,
    /// J/(m³·K)
    pub volumetric_heat_capacity: f64,
    /// m²
    pub kerf_area: f64,
}

impl PlasmaRemovalModel {
    pub fn new(config: &SimulationConfig) -> Self {
        let p = &config.plasma;
        let m = &config.material;
        PlasmaRemovalModel {
            power: p.power,
            arc_efficiency: p.arc_efficiency,
            base_transfer_efficiency: p.base_transfer_efficiency,
            activation_temperature: p.activation_temperature,
            preheat_gain: p.preheat_gain,
            preheat_rate: p.preheat_rate,
            damage_gain: p.damage_gain,
            efficiency_cap: p.efficiency_cap,
            residual_energy_fraction: p.residual_energy_fraction,
            melting_point: m.melting_point,
            ambient_temperature: m.ambient_temperature,
            specific_removal_energy: m.specific_removal_energy,
            volumetric_heat_capacity: m.volumetric_heat_capacity(),
            kerf_area: config.geometry.kerf_area(),
        }
    }

    /// Normalised position between activation and melting, clamped to [0, 1].
    /// A step at the activation temperature when melting is not above it.
    pub fn preheat_factor(&self, temperature: f64) -> f64 {
        let span = self.melting_point - self.activation_temperature;
        if span <= 0.0 {
            return if temperature >= self.activation_temperature {
                1.0
            } else {
                0.0
            };
        }
        ((temperature - self.activation_temperature) / span).clamp(0.0, 1.0)
    }

    /// Specific energy still required after laser pre-heating [J/m³].
    ///
    /// E_rem = max(E_spec − ρ·c_p·(T − T_amb), floor·E_spec)
    pub fn residual_specific_energy(&self, temperature: f64) -> f64 {
        let preheat = self.volumetric_heat_capacity * (temperature - self.ambient_temperature);
        (self.specific_removal_energy - preheat)
            .max(self.residual_energy_fraction * self.specific_removal_energy)
    }

    /// Power delivered into the material [W].
    pub fn effective_power(&self, temperature: f64, damage_fraction: f64) -> f64 {
        self.power * self.arc_efficiency * self.transfer_efficiency(temperature, damage_fraction)
    }
}

impl RemovalModel for PlasmaRemovalModel {
    fn is_active(&self, temperature: f64) -> bool {
        temperature >= self.activation_temperature
    }

    fn transfer_efficiency(&self, temperature: f64, damage_fraction: f64) -> f64 {
        let eta_temp = if self.is_active(temperature) {
            let t_factor = self.preheat_factor(temperature);
            self.base_transfer_efficiency
                * (1.0 + self.preheat_gain * (1.0 - (-self.preheat_rate * t_factor).exp()))
        } else {
            self.base_transfer_efficiency
        };
        let eta_damage = 1.0 + self.damage_gain * damage_fraction;
        (eta_temp * eta_damage).min(self.efficiency_cap)
    }

    fn volume_removal_rate(&self, temperature: f64, damage_fraction: f64) -> f64 {
        if !self.is_active(temperature) {
            return 0.0;
        }
        let v_dot = self.effective_power(temperature, damage_fraction)
            / self.residual_specific_energy(temperature);
        v_dot.max(0.0)
    }

    fn linear_rate(&self, temperature: f64, damage_fraction: f64) -> f64 {
        self.volume_removal_rate(temperature, damage_fraction) / self.kerf_area
    }
}
