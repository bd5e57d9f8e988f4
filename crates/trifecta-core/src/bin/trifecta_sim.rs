// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Simulator CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! trifecta-sim: run one drilling scenario and print its summary.
//!
//! Usage:
//!   trifecta-sim [--material NAME] [--materials FILE.json] [--config FILE.json]
//!                [--mode averaged|pulse_train] [--duration S] [--dt S] [--csv OUT.csv]

use std::process::ExitCode;
use trifecta_core::export::save_csv;
use trifecta_core::simulator::DrillingSimulator;
use trifecta_core::summary::RunSummary;
use trifecta_core::validation::find_anomalies;
use trifecta_types::config::{SafetyLimits, SimulationConfig, ThermalMode};
use trifecta_types::error::{DrillError, DrillResult};
use trifecta_types::materials::MaterialDatabase;

#[derive(Debug, Default)]
struct Args {
    material: Option<String>,
    materials_file: Option<String>,
    config: Option<String>,
    mode: Option<ThermalMode>,
    duration: Option<f64>,
    dt: Option<f64>,
    csv: Option<String>,
}

fn bad_arg(msg: String) -> DrillError {
    DrillError::InvalidConfiguration(msg)
}

fn parse_f64(flag: &str, value: &str) -> DrillResult<f64> {
    value
        .parse()
        .map_err(|_| bad_arg(format!("{flag} expects a number, got '{value}'")))
}

fn parse_args(mut it: impl Iterator<Item = String>) -> DrillResult<Args> {
    let mut args = Args::default();
    while let Some(flag) = it.next() {
        let mut value = || {
            it.next()
                .ok_or_else(|| bad_arg(format!("{flag} expects a value")))
        };
        match flag.as_str() {
            "--material" => args.material = Some(value()?),
            "--materials" => args.materials_file = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--mode" => {
                let v = value()?;
                args.mode = Some(match v.as_str() {
                    "averaged" => ThermalMode::Averaged,
                    "pulse_train" => ThermalMode::PulseTrain,
                    _ => return Err(bad_arg(format!("unknown thermal mode '{v}'"))),
                });
            }
            "--duration" => args.duration = Some(parse_f64("--duration", &value()?)?),
            "--dt" => args.dt = Some(parse_f64("--dt", &value()?)?),
            "--csv" => args.csv = Some(value()?),
            other => return Err(bad_arg(format!("unknown argument '{other}'"))),
        }
    }
    Ok(args)
}

fn build_config(args: &Args) -> DrillResult<SimulationConfig> {
    let mut config = match (&args.config, &args.material) {
        (Some(path), _) => SimulationConfig::from_file(path)?,
        (None, Some(name)) => {
            let mut db = MaterialDatabase::builtin();
            if let Some(file) = &args.materials_file {
                let added = db.load_file(file)?;
                log::info!("Loaded {added} material(s) from {file}");
            }
            SimulationConfig::for_material(db.get(name)?)
        }
        (None, None) => SimulationConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.thermal.mode = mode;
    }
    if let Some(d) = args.duration {
        config.run.duration = d;
    }
    if let Some(dt) = args.dt {
        config.run.time_step = dt;
    }
    Ok(config)
}

fn run(args: Args) -> DrillResult<()> {
    let config = build_config(&args)?;
    let limits = SafetyLimits::default();
    for violation in config.safety_violations(&limits) {
        log::warn!("Safety limit: {violation}");
    }

    let mut sim = DrillingSimulator::new(config)?;
    log::info!(
        "Running {:.3} s at dt={} s ({:?} thermal model)",
        sim.config().run.duration,
        sim.config().run.time_step,
        sim.config().thermal.mode
    );
    sim.run_configured()?;

    let anomalies = find_anomalies(sim.history(), sim.config());
    for a in anomalies.iter().take(10) {
        log::warn!("Step {}: {a}", a.step);
    }
    if anomalies.len() > 10 {
        log::warn!("... {} more anomalies", anomalies.len() - 10);
    }

    let summary = RunSummary::from_simulator(&sim);
    if summary.peak_temperature > limits.max_surface_temperature {
        log::warn!(
            "Safety limit: peak surface temperature {:.0} K exceeds {:.0} K",
            summary.peak_temperature,
            limits.max_surface_temperature
        );
    }
    println!("{summary}");

    if let Some(path) = &args.csv {
        save_csv(sim.history(), path)?;
        log::info!("Wrote {} samples to {path}", sim.history().len());
    }
    Ok(())
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    match parse_args(std::env::args().skip(1)).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
