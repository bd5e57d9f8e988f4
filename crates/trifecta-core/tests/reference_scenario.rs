// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Reference Scenario Integration Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Granite reference run: 2 s at 1 ms with default power settings.

use trifecta_core::runner::{RecordProgress, Silent};
use trifecta_core::simulator::{DrillingSimulator, OperatingPhase};
use trifecta_core::summary::RunSummary;
use trifecta_core::sweep::run_sweep;
use trifecta_core::validation::check_history;
use trifecta_types::config::{SimulationConfig, ThermalMode};
use trifecta_types::materials::MaterialDatabase;

fn reference_run() -> DrillingSimulator {
    let mut sim = DrillingSimulator::new(SimulationConfig::default()).unwrap();
    sim.run_with(2.0, 0.001, &mut Silent).unwrap();
    sim
}

#[test]
fn test_reference_history_shape() {
    let sim = reference_run();
    assert_eq!(sim.history().len(), 2001);
    assert!((sim.state().time - 2.0).abs() < 1e-9);
}

#[test]
fn test_reference_reaches_activation_early() {
    let sim = reference_run();
    let onset = sim
        .history()
        .first_time_at_or_above(800.0)
        .expect("surface should reach 800 K");
    assert!(onset < 0.5, "onset at {onset} s");
    assert_eq!(sim.phase(), OperatingPhase::FullTrifecta);
}

#[test]
fn test_reference_damage_saturates() {
    let sim = reference_run();
    let damage = sim.state().damage_fraction;
    assert!((0.06..=0.07).contains(&damage), "damage {damage}");

    let at_one_second = sim.history().samples()[1000];
    assert!((at_one_second.time - 1.0).abs() < 1e-9);
    assert!(
        (at_one_second.damage_fraction - 0.07).abs() < 0.005,
        "damage at 1 s = {}",
        at_one_second.damage_fraction
    );
}

#[test]
fn test_reference_drills_efficiently_and_cleanly() {
    let sim = reference_run();
    assert!(sim.state().depth > 0.0);
    let eff = sim.cumulative_efficiency();
    assert!(eff > 0.0 && eff < 1.0, "efficiency {eff}");
    assert!(sim.state().surface_temperature < sim.config().material.vaporization_point);
    check_history(sim.history(), sim.config()).unwrap();
}

#[test]
fn test_reference_summary() {
    let sim = reference_run();
    let s = RunSummary::from_simulator(&sim);
    assert_eq!(s.steps, 2000);
    assert!(s.plasma_onset_time.unwrap() < 0.5);
    assert!(s.mean_rate_m_per_hr > 0.0);
    assert!(s.energy_per_mm.is_some());
    // 765 W before ignition, 850 W after.
    assert!(
        s.energy_used > 1530.0 && s.energy_used < 1700.0 + 1e-6,
        "E = {}",
        s.energy_used
    );
    assert!(s.fracture_threshold_exceeded);
}

#[test]
fn test_reference_reports_all_markers() {
    let mut sim = DrillingSimulator::new(SimulationConfig::default()).unwrap();
    let mut rec = RecordProgress::default();
    sim.run_with(2.0, 0.001, &mut rec).unwrap();
    let steps: Vec<usize> = rec.reports.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![200, 500, 1000, 1500, 2000]);
    assert!(rec.reports.windows(2).all(|w| w[1].depth >= w[0].depth));
}

#[test]
fn test_pulse_train_mode_runs_clean() {
    let mut cfg = SimulationConfig::default();
    cfg.thermal.mode = ThermalMode::PulseTrain;
    let mut sim = DrillingSimulator::new(cfg).unwrap();
    sim.run_with(2.0, 0.001, &mut Silent).unwrap();
    assert_eq!(sim.history().len(), 2001);
    assert!(sim.state().surface_temperature > 300.0);
    check_history(sim.history(), sim.config()).unwrap();
}

#[test]
fn test_builtin_materials_sweep() {
    let db = MaterialDatabase::builtin();
    let configs: Vec<SimulationConfig> = db
        .names()
        .into_iter()
        .map(|name| {
            let mut cfg = SimulationConfig::for_material(db.get(name).unwrap());
            cfg.run.duration = 0.5;
            cfg
        })
        .collect();
    let results = run_sweep(&configs);
    assert_eq!(results.len(), db.len());
    for r in results {
        let s = r.unwrap();
        assert_eq!(s.steps, 500);
        assert!(s.final_temperature >= 300.0);
    }
}
