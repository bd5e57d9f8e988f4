// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Run Summary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar figures of merit for a completed (or partial) run.

use crate::simulator::DrillingSimulator;
use crate::stress::{exceeds_fracture_threshold, fracture_temperature, thermal_stress};
use serde::{Deserialize, Serialize};
use std::fmt;
use trifecta_types::constants::{M_TO_MM, RATE_AVERAGING_WINDOW, SECONDS_PER_HOUR};
use trifecta_types::state::History;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub duration: f64,
    pub final_temperature: f64,
    pub peak_temperature: f64,
    pub final_damage: f64,
    /// Final depth [m].
    pub final_depth: f64,
    /// First sample time at or above the plasma activation temperature [s].
    pub plasma_onset_time: Option<f64>,
    /// Mean linear rate over the trailing window [m/hr].
    pub mean_rate_m_per_hr: f64,
    pub cumulative_efficiency: f64,
    /// Total delivered energy [J].
    pub energy_used: f64,
    /// Delivered energy per millimetre drilled [J/mm]. None before any removal.
    pub energy_per_mm: Option<f64>,
    /// Mean rate over the material's mechanical drilling rate.
    pub speedup: Option<f64>,
    /// Thermal stress at the peak temperature [Pa].
    pub peak_thermal_stress: f64,
    pub fracture_threshold_exceeded: bool,
    /// Surface temperature at which microcracking starts [K]. None when the
    /// material does not expand.
    pub fracture_onset_temperature: Option<f64>,
}

/// Mean of `rate` over the last `min(window, len)` samples [m/s].
pub fn trailing_mean_rate(history: &History, window: usize) -> f64 {
    let samples = history.samples();
    let n = window.min(samples.len());
    if n == 0 {
        return 0.0;
    }
    samples[samples.len() - n..].iter().map(|s| s.rate).sum::<f64>() / n as f64
}

impl RunSummary {
    pub fn from_simulator(sim: &DrillingSimulator) -> Self {
        let config = sim.config();
        let state = sim.state();
        let history = sim.history();

        let peak_temperature = history.peak_temperature();
        let mean_rate_m_per_hr =
            trailing_mean_rate(history, RATE_AVERAGING_WINDOW) * SECONDS_PER_HOUR;
        let depth_mm = state.depth * M_TO_MM;
        let energy_per_mm = (depth_mm > 0.0).then(|| state.energy_used / depth_mm);
        let mechanical = config.material.mechanical_drilling_rate;
        let speedup = (mechanical > 0.0).then(|| mean_rate_m_per_hr / mechanical);
        let peak_thermal_stress = thermal_stress(&config.material, peak_temperature);
        let onset = fracture_temperature(&config.material);

        RunSummary {
            steps: sim.steps_taken(),
            duration: state.time,
            final_temperature: state.surface_temperature,
            peak_temperature,
            final_damage: state.damage_fraction,
            final_depth: state.depth,
            plasma_onset_time: history
                .first_time_at_or_above(config.plasma.activation_temperature),
            mean_rate_m_per_hr,
            cumulative_efficiency: sim.cumulative_efficiency(),
            energy_used: state.energy_used,
            energy_per_mm,
            speedup,
            peak_thermal_stress,
            fracture_threshold_exceeded: exceeds_fracture_threshold(
                &config.material,
                peak_temperature,
            ),
            fracture_onset_temperature: onset.is_finite().then_some(onset),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps:                 {} ({:.3} s)", self.steps, self.duration)?;
        writeln!(
            f,
            "surface temperature:   {:.1} K (peak {:.1} K)",
            self.final_temperature, self.peak_temperature
        )?;
        writeln!(f, "damage fraction:       {:.4}", self.final_damage)?;
        writeln!(f, "depth:                 {:.4} mm", self.final_depth * M_TO_MM)?;
        match self.plasma_onset_time {
            Some(t) => writeln!(f, "plasma onset:          {t:.3} s")?,
            None => writeln!(f, "plasma onset:          never")?,
        }
        writeln!(f, "mean rate:             {:.4} m/hr", self.mean_rate_m_per_hr)?;
        writeln!(
            f,
            "efficiency:            {:.2} %",
            self.cumulative_efficiency * 100.0
        )?;
        writeln!(f, "energy used:           {:.1} J", self.energy_used)?;
        if let Some(e) = self.energy_per_mm {
            writeln!(f, "energy per mm:         {e:.1} J/mm")?;
        }
        if let Some(s) = self.speedup {
            writeln!(f, "speedup vs mechanical: {s:.3}x")?;
        }
        if let Some(t) = self.fracture_onset_temperature {
            writeln!(f, "fracture onset:        {t:.1} K")?;
        }
        write!(
            f,
            "peak thermal stress:   {:.1} MPa{}",
            self.peak_thermal_stress / 1e6,
            if self.fracture_threshold_exceeded {
                " (above fracture threshold)"
            } else {
                ""
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Silent;
    use trifecta_types::config::SimulationConfig;
    use trifecta_types::state::HistorySample;

    #[test]
    fn test_trailing_mean_rate_window() {
        let mut h = History::new(HistorySample {
            time: 0.0,
            temperature: 300.0,
            damage_fraction: 0.0,
            depth: 0.0,
            rate: 0.0,
            cumulative_efficiency: 0.0,
        });
        for i in 1..=4 {
            let mut s = *h.last();
            s.time = i as f64;
            s.rate = i as f64;
            h.push(s);
        }
        // rates 0,1,2,3,4
        assert!((trailing_mean_rate(&h, 2) - 3.5).abs() < 1e-12);
        assert!((trailing_mean_rate(&h, 500) - 2.0).abs() < 1e-12);
        assert_eq!(trailing_mean_rate(&h, 0), 0.0);
    }

    #[test]
    fn test_cold_run_summary() {
        let mut sim = DrillingSimulator::new(SimulationConfig::default()).unwrap();
        sim.run_with(0.01, 1e-3, &mut Silent).unwrap();
        let s = RunSummary::from_simulator(&sim);
        assert_eq!(s.steps, 10);
        assert_eq!(s.final_depth, 0.0);
        assert_eq!(s.plasma_onset_time, None);
        assert_eq!(s.mean_rate_m_per_hr, 0.0);
        assert_eq!(s.energy_per_mm, None);
        assert_eq!(s.speedup, Some(0.0));
        assert!((s.energy_used - 7.65).abs() < 1e-9);
        assert!((s.fracture_onset_temperature.unwrap() - 487.5).abs() < 1e-9);
        assert!(!s.fracture_threshold_exceeded);
        assert!(s.peak_temperature >= s.final_temperature);
    }

    #[test]
    fn test_hot_run_summary() {
        let mut cfg = SimulationConfig::default();
        cfg.material.ambient_temperature = 900.0;
        let mut sim = DrillingSimulator::new(cfg).unwrap();
        sim.run_with(0.01, 1e-3, &mut Silent).unwrap();
        let s = RunSummary::from_simulator(&sim);
        assert_eq!(s.plasma_onset_time, Some(0.0));
        assert!(s.final_depth > 0.0);
        assert!(s.mean_rate_m_per_hr > 0.0);
        assert!(s.energy_per_mm.unwrap() > 0.0);
        assert!(s.speedup.unwrap() > 0.0);
        let text = s.to_string();
        assert!(text.contains("plasma onset"), "{text}");
    }

    #[test]
    fn test_summary_serializes() {
        let sim = DrillingSimulator::new(SimulationConfig::default()).unwrap();
        let s = RunSummary::from_simulator(&sim);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"plasma_onset_time\":null"));
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.steps, 0);
    }
}
