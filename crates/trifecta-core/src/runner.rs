// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Runner
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed-step run loop with coarse progress markers.
//!
//! A run is `ceil(duration/dt)` explicit steps. Observers see every marker
//! crossing (10/25/50/75/100 %) and may stop the run between steps.

use crate::simulator::DrillingSimulator;
use std::ops::ControlFlow;
use trifecta_types::constants::{M_TO_MM, PROGRESS_MARKERS};
use trifecta_types::error::{DrillError, DrillResult};

/// Upper bound on history slots reserved before a run; longer runs grow
/// the history as they go.
const MAX_PREALLOCATED_STEPS: usize = 1 << 16;

/// Snapshot handed to observers when a progress marker is crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Marker fraction (0.10, 0.25, ...).
    pub fraction: f64,
    pub step: usize,
    pub total_steps: usize,
    pub time: f64,
    pub temperature: f64,
    pub depth: f64,
}

/// Result of a run that started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub steps_requested: usize,
    pub steps_completed: usize,
    pub cancelled: bool,
}

pub trait ProgressObserver {
    /// Called once per crossed marker.
    fn on_marker(&mut self, _report: &ProgressReport) {}

    /// Called after every step. `Break` stops the run before the next step.
    fn after_step(&mut self, _sim: &DrillingSimulator, _step: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Logs each marker at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_marker(&mut self, report: &ProgressReport) {
        log::info!(
            "Progress: {:.0}% (T={:.0}K, depth={:.2}mm)",
            report.fraction * 100.0,
            report.temperature,
            report.depth * M_TO_MM
        );
    }
}

/// Reports nothing. For sweeps and benches.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ProgressObserver for Silent {}

/// Cooperative cancellation from a predicate evaluated after every step.
pub struct StopWhen<F>(pub F);

impl<F> ProgressObserver for StopWhen<F>
where
    F: FnMut(&DrillingSimulator) -> bool,
{
    fn after_step(&mut self, sim: &DrillingSimulator, _step: usize) -> ControlFlow<()> {
        if (self.0)(sim) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Collects every report; used by tests and front-ends that draw their own bars.
#[derive(Debug, Default, Clone)]
pub struct RecordProgress {
    pub reports: Vec<ProgressReport>,
}

impl ProgressObserver for RecordProgress {
    fn on_marker(&mut self, report: &ProgressReport) {
        self.reports.push(*report);
    }
}

/// Number of fixed steps for a run: `ceil(duration/dt)`.
pub fn step_count(duration: f64, dt: f64) -> DrillResult<usize> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(DrillError::InvalidConfiguration(format!(
            "time step must be finite and > 0, got {dt}"
        )));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(DrillError::InvalidConfiguration(format!(
            "duration must be finite and > 0, got {duration}"
        )));
    }
    let steps = (duration / dt).ceil();
    if !steps.is_finite() || steps > usize::MAX as f64 {
        return Err(DrillError::InvalidConfiguration(format!(
            "duration/dt = {duration}/{dt} yields too many steps"
        )));
    }
    Ok(steps as usize)
}

/// Drive `sim` for `duration` seconds at fixed `dt`.
/// Invalid inputs are rejected before any step executes.
pub fn run<O: ProgressObserver + ?Sized>(
    sim: &mut DrillingSimulator,
    duration: f64,
    dt: f64,
    observer: &mut O,
) -> DrillResult<RunOutcome> {
    let total = step_count(duration, dt)?;
    sim.reserve_history(total.min(MAX_PREALLOCATED_STEPS));
    log::debug!("Running {total} steps of {dt} s ({duration} s)");

    let mut marker_idx = 0;
    for i in 0..total {
        sim.advance(dt);
        let done = i + 1;

        let progress = done as f64 / total as f64;
        while marker_idx < PROGRESS_MARKERS.len() && progress >= PROGRESS_MARKERS[marker_idx] {
            let state = sim.state();
            observer.on_marker(&ProgressReport {
                fraction: PROGRESS_MARKERS[marker_idx],
                step: done,
                total_steps: total,
                time: state.time,
                temperature: state.surface_temperature,
                depth: state.depth,
            });
            marker_idx += 1;
        }

        if observer.after_step(sim, done).is_break() {
            log::info!("Run stopped by observer after {done}/{total} steps");
            return Ok(RunOutcome {
                steps_requested: total,
                steps_completed: done,
                cancelled: true,
            });
        }
    }

    log::info!(
        "Simulation complete: {total} steps, T={:.0}K, depth={:.3}mm",
        sim.state().surface_temperature,
        sim.state().depth * M_TO_MM
    );
    Ok(RunOutcome {
        steps_requested: total,
        steps_completed: total,
        cancelled: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trifecta_types::config::SimulationConfig;

    fn sim() -> DrillingSimulator {
        DrillingSimulator::new(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_step_count_ceil() {
        assert_eq!(step_count(2.0, 0.001).unwrap(), 2000);
        assert_eq!(step_count(1.0, 0.3).unwrap(), 4);
        assert_eq!(step_count(0.5, 1.0).unwrap(), 1);
    }

    #[test]
    fn test_step_count_rejects_bad_inputs() {
        assert!(step_count(0.0, 0.001).is_err());
        assert!(step_count(-1.0, 0.001).is_err());
        assert!(step_count(1.0, 0.0).is_err());
        assert!(step_count(1.0, -0.1).is_err());
        assert!(step_count(f64::NAN, 0.1).is_err());
        assert!(step_count(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejected_run_leaves_history_untouched() {
        let mut s = sim();
        assert!(s.run(-1.0, 0.001).is_err());
        assert!(s.run(1.0, 0.0).is_err());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_markers_reported_once_each() {
        let mut s = sim();
        let mut rec = RecordProgress::default();
        let outcome = s.run_with(0.1, 0.001, &mut rec).unwrap();
        assert_eq!(outcome.steps_completed, 100);
        assert!(!outcome.cancelled);
        let fractions: Vec<f64> = rec.reports.iter().map(|r| r.fraction).collect();
        assert_eq!(fractions, PROGRESS_MARKERS.to_vec());
        assert_eq!(rec.reports[0].step, 10);
        assert_eq!(rec.reports[4].step, 100);
    }

    #[test]
    fn test_single_step_run_crosses_all_markers() {
        let mut s = sim();
        let mut rec = RecordProgress::default();
        s.run_with(0.001, 0.001, &mut rec).unwrap();
        assert_eq!(rec.reports.len(), PROGRESS_MARKERS.len());
        assert!(rec.reports.iter().all(|r| r.step == 1));
    }

    #[test]
    fn test_cooperative_cancel_between_steps() {
        let mut s = sim();
        let mut stop = StopWhen(|sim: &DrillingSimulator| sim.state().time >= 0.0095);
        let outcome = s.run_with(1.0, 0.001, &mut stop).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.steps_requested, 1000);
        assert_eq!(outcome.steps_completed, 10);
        assert_eq!(s.history().len(), 11);
    }

    #[test]
    fn test_cancel_long_run_without_preallocating() {
        let mut s = sim();
        let mut stop = StopWhen(|sim: &DrillingSimulator| sim.steps_taken() >= 5);
        let outcome = run(&mut s, 1e6, 1e-12, &mut stop).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.steps_completed, 5);
        assert!(outcome.steps_requested > 100_000_000_000_000_000);
        assert_eq!(s.history().len(), 6);
    }
}
