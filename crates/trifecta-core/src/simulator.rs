// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Drilling Simulator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coupled acoustic–thermal–plasma drilling integrator.
//!
//! Per step: elapsed time → damage → temperature → removal rate →
//! depth/energy → history snapshot. The simulator owns the only mutable
//! state; the three sub-models are stateless strategies fixed at
//! construction.

use crate::acoustic::{AcousticDamageModel, DamageModel};
use crate::plasma::{PlasmaRemovalModel, RemovalModel};
use crate::runner::{self, LogProgress, ProgressObserver, RunOutcome};
use crate::thermal::{build_thermal_model, ThermalModel};
use std::fmt;
use trifecta_types::config::SimulationConfig;
use trifecta_types::error::{DrillError, DrillResult};
use trifecta_types::materials::MaterialDatabase;
use trifecta_types::state::{History, HistorySample, SimulationState};

/// Operating phase, derived from the current surface temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingPhase {
    /// Acoustic pre-stress and laser heating only.
    Preconditioning,
    /// Plasma torch firing on top of acoustic and laser.
    FullTrifecta,
}

pub struct DrillingSimulator {
    config: SimulationConfig,
    acoustic: Box<dyn DamageModel>,
    thermal: Box<dyn ThermalModel>,
    plasma: Box<dyn RemovalModel>,
    state: SimulationState,
    history: History,
}

impl fmt::Debug for DrillingSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillingSimulator")
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .field("thermal_mode", &self.config.thermal.mode)
            .finish_non_exhaustive()
    }
}

impl DrillingSimulator {
    /// Validate `config` and wire the default models.
    pub fn new(config: SimulationConfig) -> DrillResult<Self> {
        config.validate()?;
        let acoustic = Box::new(AcousticDamageModel::new(&config.acoustic));
        let thermal = build_thermal_model(&config);
        let plasma = Box::new(PlasmaRemovalModel::new(&config));
        Ok(Self::assemble(config, acoustic, thermal, plasma))
    }

    /// Reference configuration for a named material from `db`.
    pub fn for_material(db: &MaterialDatabase, name: &str) -> DrillResult<Self> {
        let props = db.get(name)?;
        Self::new(SimulationConfig::for_material(props))
    }

    /// Validate `config` and wire caller-supplied models.
    pub fn with_models(
        config: SimulationConfig,
        acoustic: Box<dyn DamageModel>,
        thermal: Box<dyn ThermalModel>,
        plasma: Box<dyn RemovalModel>,
    ) -> DrillResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, acoustic, thermal, plasma))
    }

    fn assemble(
        config: SimulationConfig,
        acoustic: Box<dyn DamageModel>,
        thermal: Box<dyn ThermalModel>,
        plasma: Box<dyn RemovalModel>,
    ) -> Self {
        let state = SimulationState::initial(config.material.ambient_temperature);
        let history = History::new(HistorySample::initial(&state));
        DrillingSimulator {
            config,
            acoustic,
            thermal,
            plasma,
            state,
            history,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of steps taken since construction or the last reset.
    pub fn steps_taken(&self) -> usize {
        self.history.len() - 1
    }

    /// Re-evaluated on every call, never cached.
    pub fn is_plasma_active(&self) -> bool {
        self.plasma.is_active(self.state.surface_temperature)
    }

    pub fn phase(&self) -> OperatingPhase {
        if self.is_plasma_active() {
            OperatingPhase::FullTrifecta
        } else {
            OperatingPhase::Preconditioning
        }
    }

    /// Ideal removal energy over delivered energy since t = 0, using the
    /// undiscounted specific energy.
    pub fn cumulative_efficiency(&self) -> f64 {
        if self.state.energy_used > 0.0 {
            let removed_volume = self.state.depth * self.config.geometry.kerf_area();
            self.config.material.specific_removal_energy * removed_volume / self.state.energy_used
        } else {
            0.0
        }
    }

    /// Advance one fixed step of `dt` seconds.
    pub fn step(&mut self, dt: f64) -> DrillResult<()> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(DrillError::InvalidConfiguration(format!(
                "time step must be finite and > 0, got {dt}"
            )));
        }
        self.advance(dt);
        Ok(())
    }

    /// Step body; `dt` already validated.
    pub(crate) fn advance(&mut self, dt: f64) {
        let was_active = self.is_plasma_active();

        self.state.time += dt;

        // Full recomputation from elapsed time keeps time skips consistent.
        self.state.damage_fraction = self.acoustic.damage(self.state.time);

        let ambient = self.config.material.ambient_temperature;
        self.state.surface_temperature = self
            .thermal
            .step_temperature(
                self.state.surface_temperature,
                self.state.damage_fraction,
                dt,
            )
            .max(ambient);

        let temperature = self.state.surface_temperature;
        let damage = self.state.damage_fraction;
        let rate = self.plasma.linear_rate(temperature, damage);
        self.state.depth += rate * dt;

        let active = self.plasma.is_active(temperature);
        let plasma_power = if active { self.config.plasma.power } else { 0.0 };
        self.state.energy_used +=
            dt * (self.config.acoustic.power + self.config.laser.average_power + plasma_power);

        if active != was_active {
            log::debug!(
                "t={:.4} s: plasma {} at T={:.0} K",
                self.state.time,
                if active { "ignited" } else { "extinguished" },
                temperature
            );
        }

        let cumulative_efficiency = self.cumulative_efficiency();
        self.history.push(HistorySample {
            time: self.state.time,
            temperature,
            damage_fraction: damage,
            depth: self.state.depth,
            rate,
            cumulative_efficiency,
        });
    }

    pub(crate) fn reserve_history(&mut self, steps: usize) {
        self.history.reserve(steps);
    }

    /// Run `ceil(duration/dt)` fixed steps, logging progress markers.
    pub fn run(&mut self, duration: f64, dt: f64) -> DrillResult<RunOutcome> {
        runner::run(self, duration, dt, &mut LogProgress)
    }

    /// Run with a caller-supplied observer that may stop between steps.
    pub fn run_with<O: ProgressObserver>(
        &mut self,
        duration: f64,
        dt: f64,
        observer: &mut O,
    ) -> DrillResult<RunOutcome> {
        runner::run(self, duration, dt, observer)
    }

    /// Run for the configured duration and time step.
    pub fn run_configured(&mut self) -> DrillResult<RunOutcome> {
        let (duration, dt) = (self.config.run.duration, self.config.run.time_step);
        self.run(duration, dt)
    }

    /// Back to the cold initial state; history keeps only its first snapshot.
    pub fn reset(&mut self) {
        self.state = SimulationState::initial(self.config.material.ambient_temperature);
        self.history.truncate_to_initial();
    }
}
