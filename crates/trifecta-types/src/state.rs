// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Lumped physical state of the drilling spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Elapsed time [s]
    pub time: f64,
    /// Surface temperature [K]
    pub surface_temperature: f64,
    /// Acoustic fatigue damage fraction
    pub damage_fraction: f64,
    /// Drilled depth [m]
    pub depth: f64,
    /// Electrical energy delivered so far [J]
    pub energy_used: f64,
}

impl SimulationState {
    /// Cold start at ambient temperature.
    pub fn initial(ambient_temperature: f64) -> Self {
        SimulationState {
            time: 0.0,
            surface_temperature: ambient_temperature,
            damage_fraction: 0.0,
            depth: 0.0,
            energy_used: 0.0,
        }
    }
}

/// One row of the run history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub time: f64,
    pub temperature: f64,
    pub damage_fraction: f64,
    pub depth: f64,
    /// Instantaneous linear drilling rate [m/s]
    pub rate: f64,
    /// Ideal removal energy over delivered energy, since t = 0
    pub cumulative_efficiency: f64,
}

impl HistorySample {
    /// Snapshot of a state with no removal recorded yet.
    pub fn initial(state: &SimulationState) -> Self {
        HistorySample {
            time: state.time,
            temperature: state.surface_temperature,
            damage_fraction: state.damage_fraction,
            depth: state.depth,
            rate: 0.0,
            cumulative_efficiency: 0.0,
        }
    }
}

/// Append-only run history. Always holds at least the initial snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord")]
pub struct History {
    samples: Vec<HistorySample>,
}

/// Wire form of [`History`], checked on the way in.
#[derive(Deserialize)]
struct HistoryRecord {
    samples: Vec<HistorySample>,
}

impl TryFrom<HistoryRecord> for History {
    type Error = String;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        if record.samples.is_empty() {
            return Err("history must contain at least the initial snapshot".into());
        }
        Ok(History {
            samples: record.samples,
        })
    }
}

impl History {
    pub fn new(initial: HistorySample) -> Self {
        History {
            samples: vec![initial],
        }
    }

    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push(sample);
    }

    /// Drop everything after the initial snapshot.
    pub fn truncate_to_initial(&mut self) {
        self.samples.truncate(1);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.samples.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true: the initial snapshot is always present.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn initial(&self) -> &HistorySample {
        &self.samples[0]
    }

    pub fn last(&self) -> &HistorySample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistorySample> {
        self.samples.iter()
    }

    /// Time of the first sample at or above `temperature`, if any.
    pub fn first_time_at_or_above(&self, temperature: f64) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.temperature >= temperature)
            .map(|s| s.time)
    }

    pub fn peak_temperature(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.temperature)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistorySample;
    type IntoIter = std::slice::Iter<'a, HistorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, temperature: f64) -> HistorySample {
        HistorySample {
            time,
            temperature,
            damage_fraction: 0.0,
            depth: 0.0,
            rate: 0.0,
            cumulative_efficiency: 0.0,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SimulationState::initial(300.0);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.surface_temperature, 300.0);
        assert_eq!(state.damage_fraction, 0.0);
        assert_eq!(state.depth, 0.0);
        assert_eq!(state.energy_used, 0.0);
        let snap = HistorySample::initial(&state);
        assert_eq!(snap.temperature, 300.0);
        assert_eq!(snap.rate, 0.0);
    }

    #[test]
    fn test_history_append_and_truncate() {
        let mut h = History::new(sample(0.0, 300.0));
        assert_eq!(h.len(), 1);
        h.push(sample(0.1, 400.0));
        h.push(sample(0.2, 900.0));
        assert_eq!(h.len(), 3);
        assert_eq!(h.last().time, 0.2);
        h.truncate_to_initial();
        assert_eq!(h.len(), 1);
        assert_eq!(h.initial().temperature, 300.0);
        assert!(!h.is_empty());
    }

    #[test]
    fn test_first_time_at_or_above() {
        let mut h = History::new(sample(0.0, 300.0));
        h.push(sample(0.1, 799.0));
        h.push(sample(0.2, 800.0));
        h.push(sample(0.3, 850.0));
        assert_eq!(h.first_time_at_or_above(800.0), Some(0.2));
        assert_eq!(h.first_time_at_or_above(2000.0), None);
        assert_eq!(h.peak_temperature(), 850.0);
    }

    #[test]
    fn test_json_roundtrip_keeps_samples() {
        let mut h = History::new(sample(0.0, 300.0));
        h.push(sample(0.1, 400.0));
        let json = serde_json::to_string(&h).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.last().temperature, 400.0);
    }

    #[test]
    fn test_empty_history_rejected_on_load() {
        let err = serde_json::from_str::<History>(r#"{"samples":[]}"#).unwrap_err();
        assert!(err.to_string().contains("initial snapshot"), "{err}");
    }
}
