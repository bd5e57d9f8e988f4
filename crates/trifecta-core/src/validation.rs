// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — History Validation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Post-hoc numeric anomaly detection over a completed history.
//!
//! The integrator never raises these itself; callers decide what an
//! anomalous run means for them.

use std::fmt;
use trifecta_types::config::SimulationConfig;
use trifecta_types::error::{DrillError, DrillResult};
use trifecta_types::state::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    NonFinite,
    TimeNotIncreasing,
    BelowAmbient,
    AboveVaporization,
    DamageOutOfRange,
    DamageDecreased,
    NegativeDepthDelta,
    NegativeRate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anomaly {
    /// Index into the history.
    pub step: usize,
    pub time: f64,
    pub kind: AnomalyKind,
    /// Offending value.
    pub value: f64,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            AnomalyKind::NonFinite => "non-finite value",
            AnomalyKind::TimeNotIncreasing => "time not increasing",
            AnomalyKind::BelowAmbient => "temperature below ambient",
            AnomalyKind::AboveVaporization => "temperature above vaporization point",
            AnomalyKind::DamageOutOfRange => "damage fraction out of range",
            AnomalyKind::DamageDecreased => "damage fraction decreased",
            AnomalyKind::NegativeDepthDelta => "negative depth increment",
            AnomalyKind::NegativeRate => "negative drilling rate",
        };
        write!(f, "{what} ({}) at t={:.6} s", self.value, self.time)
    }
}

/// Every anomaly in `history`, in step order.
pub fn find_anomalies(history: &History, config: &SimulationConfig) -> Vec<Anomaly> {
    let ambient = config.material.ambient_temperature;
    let vaporization = config.material.vaporization_point;
    let max_damage = config.acoustic.max_damage_fraction;

    let mut out = Vec::new();
    let mut push = |step: usize, time: f64, kind: AnomalyKind, value: f64| {
        out.push(Anomaly {
            step,
            time,
            kind,
            value,
        })
    };

    let samples = history.samples();
    for (i, s) in samples.iter().enumerate() {
        let values = [
            s.time,
            s.temperature,
            s.damage_fraction,
            s.depth,
            s.rate,
            s.cumulative_efficiency,
        ];
        if let Some(&v) = values.iter().find(|v| !v.is_finite()) {
            push(i, s.time, AnomalyKind::NonFinite, v);
            continue;
        }
        if s.temperature < ambient {
            push(i, s.time, AnomalyKind::BelowAmbient, s.temperature);
        }
        if s.temperature > vaporization {
            push(i, s.time, AnomalyKind::AboveVaporization, s.temperature);
        }
        if !(0.0..=max_damage).contains(&s.damage_fraction) {
            push(i, s.time, AnomalyKind::DamageOutOfRange, s.damage_fraction);
        }
        if s.rate < 0.0 {
            push(i, s.time, AnomalyKind::NegativeRate, s.rate);
        }
        if i > 0 {
            let prev = &samples[i - 1];
            if s.time <= prev.time {
                push(i, s.time, AnomalyKind::TimeNotIncreasing, s.time);
            }
            if s.damage_fraction < prev.damage_fraction {
                push(i, s.time, AnomalyKind::DamageDecreased, s.damage_fraction);
            }
            let delta = s.depth - prev.depth;
            if delta < 0.0 {
                push(i, s.time, AnomalyKind::NegativeDepthDelta, delta);
            }
        }
    }
    out
}

/// `Err(NumericAnomaly)` for the first anomaly found.
pub fn check_history(history: &History, config: &SimulationConfig) -> DrillResult<()> {
    match find_anomalies(history, config).first() {
        Some(a) => Err(DrillError::NumericAnomaly {
            step: a.step,
            message: a.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trifecta_types::state::HistorySample;

    fn sample(time: f64, temperature: f64, damage: f64, depth: f64) -> HistorySample {
        HistorySample {
            time,
            temperature,
            damage_fraction: damage,
            depth,
            rate: 0.0,
            cumulative_efficiency: 0.0,
        }
    }

    fn clean() -> History {
        let mut h = History::new(sample(0.0, 300.0, 0.0, 0.0));
        h.push(sample(0.001, 310.0, 0.001, 0.0));
        h.push(sample(0.002, 900.0, 0.002, 1e-6));
        h
    }

    #[test]
    fn test_clean_history_passes() {
        let cfg = SimulationConfig::default();
        assert!(find_anomalies(&clean(), &cfg).is_empty());
        check_history(&clean(), &cfg).unwrap();
    }

    #[test]
    fn test_flags_vaporization_and_negative_depth() {
        let cfg = SimulationConfig::default();
        let mut h = clean();
        h.push(sample(0.003, 3100.0, 0.003, 0.5e-6));
        let found = find_anomalies(&h, &cfg);
        let kinds: Vec<AnomalyKind> = found.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AnomalyKind::AboveVaporization, AnomalyKind::NegativeDepthDelta]
        );
        assert!(found.iter().all(|a| a.step == 3));
    }

    #[test]
    fn test_flags_damage_out_of_range_and_decrease() {
        let cfg = SimulationConfig::default();
        let mut h = clean();
        h.push(sample(0.003, 900.0, 1.2, 1e-6));
        h.push(sample(0.004, 900.0, 0.01, 1e-6));
        let kinds: Vec<AnomalyKind> = find_anomalies(&h, &cfg).iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AnomalyKind::DamageOutOfRange, AnomalyKind::DamageDecreased]
        );
    }

    #[test]
    fn test_non_finite_short_circuits_row() {
        let cfg = SimulationConfig::default();
        let mut h = clean();
        h.push(sample(0.003, f64::NAN, 0.003, 1e-6));
        let found = find_anomalies(&h, &cfg);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, AnomalyKind::NonFinite);
    }

    #[test]
    fn test_check_history_reports_first() {
        let cfg = SimulationConfig::default();
        let mut h = clean();
        h.push(sample(0.003, 250.0, 0.003, 1e-6));
        let err = check_history(&h, &cfg).unwrap_err();
        match err {
            DrillError::NumericAnomaly { step, message } => {
                assert_eq!(step, 3);
                assert!(message.contains("below ambient"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
