// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Parameter Sweeps
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Independent simulators over a set of configurations, run in parallel.

use crate::runner::Silent;
use crate::simulator::DrillingSimulator;
use crate::summary::RunSummary;
use ndarray::Array1;
use rayon::prelude::*;
use trifecta_types::config::SimulationConfig;
use trifecta_types::error::{DrillError, DrillResult};

/// One swept parameter value and its run result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub parameter: f64,
    pub summary: RunSummary,
}

fn run_one(config: &SimulationConfig) -> DrillResult<RunSummary> {
    let mut sim = DrillingSimulator::new(config.clone())?;
    let (duration, dt) = (config.run.duration, config.run.time_step);
    sim.run_with(duration, dt, &mut Silent)?;
    Ok(RunSummary::from_simulator(&sim))
}

/// Run each config for its own `run` parameters. Results keep input order.
pub fn run_sweep(configs: &[SimulationConfig]) -> Vec<DrillResult<RunSummary>> {
    log::info!("Sweeping {} configurations", configs.len());
    configs.par_iter().map(run_one).collect()
}

/// `n` copies of `base` with one parameter set by `apply` over
/// `linspace(start, end, n)`.
pub fn linear_variants<F>(
    base: &SimulationConfig,
    start: f64,
    end: f64,
    n: usize,
    apply: F,
) -> DrillResult<(Array1<f64>, Vec<SimulationConfig>)>
where
    F: Fn(&mut SimulationConfig, f64),
{
    if n == 0 || !start.is_finite() || !end.is_finite() {
        return Err(DrillError::InvalidConfiguration(format!(
            "sweep needs n > 0 and finite bounds, got n={n}, [{start}, {end}]"
        )));
    }
    let values = Array1::linspace(start, end, n);
    let configs = values
        .iter()
        .map(|&v| {
            let mut cfg = base.clone();
            apply(&mut cfg, v);
            cfg
        })
        .collect();
    Ok((values, configs))
}

pub fn sweep_parameter<F>(
    base: &SimulationConfig,
    start: f64,
    end: f64,
    n: usize,
    apply: F,
) -> DrillResult<Vec<DrillResult<SweepPoint>>>
where
    F: Fn(&mut SimulationConfig, f64),
{
    let (values, configs) = linear_variants(base, start, end, n, apply)?;
    Ok(values
        .iter()
        .zip(run_sweep(&configs))
        .map(|(&parameter, result)| result.map(|summary| SweepPoint { parameter, summary }))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_base() -> SimulationConfig {
        let mut cfg = SimulationConfig::default();
        cfg.run.duration = 0.02;
        cfg
    }

    #[test]
    fn test_linear_variants_spacing() {
        let (values, configs) =
            linear_variants(&short_base(), 50.0, 100.0, 3, |c, v| c.plasma.power = v).unwrap();
        assert_eq!(configs.len(), 3);
        assert!((values[1] - 75.0).abs() < 1e-12);
        assert!((configs[2].plasma.power - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_variants_rejects_empty() {
        let err = linear_variants(&short_base(), 0.0, 1.0, 0, |_, _| {}).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_sweep_preserves_order_and_errors() {
        let mut bad = short_base();
        bad.run.time_step = 0.0;
        let configs = vec![short_base(), bad, short_base()];
        let results = run_sweep(&configs);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[0].as_ref().unwrap(), results[2].as_ref().unwrap());
    }

    #[test]
    fn test_sweep_parameter_hotter_ambient_heats_more() {
        let points =
            sweep_parameter(&short_base(), 300.0, 400.0, 2, |c, v| {
                c.material.ambient_temperature = v
            })
            .unwrap();
        let a = points[0].as_ref().unwrap();
        let b = points[1].as_ref().unwrap();
        assert_eq!(a.parameter, 300.0);
        assert_eq!(b.parameter, 400.0);
        assert!(b.summary.final_temperature > a.summary.final_temperature);
        assert_eq!(a.summary.steps, 20);
    }
}
