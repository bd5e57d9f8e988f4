// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Thermal Stress
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thermo-elastic stress of a constrained surface layer.
//!
//!   σ = E·α·ΔT / (1 − ν)

use trifecta_types::config::MaterialParams;

/// Compressive thermal stress at `temperature` [Pa]. Zero at ambient.
pub fn thermal_stress(material: &MaterialParams, temperature: f64) -> f64 {
    let delta_t = temperature - material.ambient_temperature;
    material.youngs_modulus * material.thermal_expansion * delta_t
        / (1.0 - material.poissons_ratio)
}

pub fn exceeds_fracture_threshold(material: &MaterialParams, temperature: f64) -> bool {
    thermal_stress(material, temperature) >= material.fracture_threshold
}

/// Surface temperature at which thermal stress reaches the microcrack
/// threshold [K]. Infinite when the material does not expand.
pub fn fracture_temperature(material: &MaterialParams) -> f64 {
    let stiffness = material.youngs_modulus * material.thermal_expansion;
    if stiffness <= 0.0 {
        return f64::INFINITY;
    }
    material.ambient_temperature
        + material.fracture_threshold * (1.0 - material.poissons_ratio) / stiffness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_ambient() {
        let m = MaterialParams::default();
        assert_eq!(thermal_stress(&m, 300.0), 0.0);
        assert!(!exceeds_fracture_threshold(&m, 300.0));
    }

    #[test]
    fn test_granite_at_steady_state() {
        // 50 GPa · 8e-6 · 1005 K / 0.75 ≈ 536 MPa
        let m = MaterialParams::default();
        let sigma = thermal_stress(&m, 1305.0);
        assert!((sigma - 536e6).abs() < 1e6, "sigma = {sigma}");
        assert!(exceeds_fracture_threshold(&m, 1305.0));
    }

    #[test]
    fn test_fracture_temperature_inverts_stress() {
        let m = MaterialParams::default();
        let t_frac = fracture_temperature(&m);
        assert!((t_frac - 487.5).abs() < 1e-9, "T_frac = {t_frac}");
        assert!((thermal_stress(&m, t_frac) - m.fracture_threshold).abs() < 1e-3);
    }

    #[test]
    fn test_no_expansion_never_fractures() {
        let m = MaterialParams {
            thermal_expansion: 0.0,
            ..MaterialParams::default()
        };
        assert!(fracture_temperature(&m).is_infinite());
        assert!(!exceeds_fracture_threshold(&m, 3000.0));
    }
}
