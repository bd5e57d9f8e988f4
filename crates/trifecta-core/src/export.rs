// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — History Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CSV / JSON export of the run history and columnar views for analysis.

use ndarray::Array1;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use trifecta_types::error::DrillResult;
use trifecta_types::state::{History, HistorySample};

pub const CSV_HEADER: &str = "time_s,temperature_k,damage_fraction,depth_m,rate_m_per_s,cumulative_efficiency";

/// One `Array1` per history field, all of length `history.len()`.
#[derive(Debug, Clone)]
pub struct HistoryColumns {
    pub time: Array1<f64>,
    pub temperature: Array1<f64>,
    pub damage_fraction: Array1<f64>,
    pub depth: Array1<f64>,
    pub rate: Array1<f64>,
    pub cumulative_efficiency: Array1<f64>,
}

pub fn columns(history: &History) -> HistoryColumns {
    let col = |f: fn(&HistorySample) -> f64| {
        history.iter().map(f).collect::<Array1<f64>>()
    };
    HistoryColumns {
        time: col(|s| s.time),
        temperature: col(|s| s.temperature),
        damage_fraction: col(|s| s.damage_fraction),
        depth: col(|s| s.depth),
        rate: col(|s| s.rate),
        cumulative_efficiency: col(|s| s.cumulative_efficiency),
    }
}

pub fn write_csv<W: Write>(history: &History, mut out: W) -> DrillResult<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for s in history {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            s.time, s.temperature, s.damage_fraction, s.depth, s.rate, s.cumulative_efficiency
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(history: &History, path: P) -> DrillResult<()> {
    let file = File::create(path)?;
    write_csv(history, BufWriter::new(file))
}

pub fn to_json(history: &History) -> DrillResult<String> {
    Ok(serde_json::to_string_pretty(history)?)
}
