// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Acoustic Damage
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Acoustic fatigue damage from continuous ultrasonic pre-stress.
//!
//! Damage is a saturating function of the stress-cycle count N = f·t:
//!   f_damage = f_max·(1 − exp(−N/N_char)),   N ≥ 1
//! and exactly zero below the first full cycle.

use trifecta_types::config::AcousticParams;

/// Time → damage-fraction strategy.
pub trait DamageModel: Send + Sync {
    /// Damage fraction after `time` seconds of exposure.
    fn damage(&self, time: f64) -> f64;
}

/// Saturating fatigue-damage curve.
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticDamageModel {
    pub frequency: f64,
    pub max_damage_fraction: f64,
    pub saturation_cycles: f64,
}

impl AcousticDamageModel {
    pub fn new(params: &AcousticParams) -> Self {
        AcousticDamageModel {
            frequency: params.frequency,
            max_damage_fraction: params.max_damage_fraction,
            saturation_cycles: params.saturation_cycles,
        }
    }

    /// Stress cycles accumulated after `time` seconds.
    pub fn cycles(&self, time: f64) -> f64 {
        self.frequency * time
    }
}

impl DamageModel for AcousticDamageModel {
    fn damage(&self, time: f64) -> f64 {
        let n_cycles = self.cycles(time);
        // Sub-cycle exposure is truncated, not smoothed.
        if n_cycles < 1.0 {
            return 0.0;
        }
        self.max_damage_fraction * (1.0 - (-n_cycles / self.saturation_cycles).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> AcousticDamageModel {
        AcousticDamageModel::new(&AcousticParams::default())
    }

    #[test]
    fn test_sub_cycle_is_exactly_zero() {
        let model = reference();
        assert_eq!(model.damage(0.0), 0.0);
        // 40 kHz → first full cycle at 25 µs
        assert_eq!(model.damage(24e-6), 0.0);
        assert!(model.damage(26e-6) > 0.0);
    }

    #[test]
    fn test_saturates_near_max_after_one_second() {
        let model = reference();
        assert!((model.cycles(1.0) - 4e4).abs() < 1e-9);
        let f = model.damage(1.0);
        assert!((f - 0.07).abs() < 0.002, "damage at 1 s: {f}");
        assert!(f < 0.07);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let model = reference();
        let mut prev = 0.0;
        for i in 0..2000 {
            let f = model.damage(i as f64 * 1e-3);
            assert!(f >= prev, "damage decreased at step {i}: {f} < {prev}");
            assert!((0.0..=0.07).contains(&f));
            prev = f;
        }
    }

    #[test]
    fn test_zero_ceiling_gives_zero_damage() {
        let model = AcousticDamageModel {
            max_damage_fraction: 0.0,
            ..reference()
        };
        for t in [0.0, 1e-3, 0.5, 10.0] {
            assert_eq!(model.damage(t), 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let model = reference();
        assert_eq!(model.damage(0.123), model.damage(0.123));
    }
}
