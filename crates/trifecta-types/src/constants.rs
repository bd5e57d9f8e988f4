// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Stefan-Boltzmann constant (W/(m²·K⁴)).
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Seconds per hour, for m/s → m/hr drilling-rate conversion.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Metres to millimetres.
pub const M_TO_MM: f64 = 1.0e3;

/// Fractions of a run at which progress is reported.
pub const PROGRESS_MARKERS: [f64; 5] = [0.10, 0.25, 0.50, 0.75, 1.00];

/// Number of trailing history samples averaged for the reported drilling rate.
pub const RATE_AVERAGING_WINDOW: usize = 500;

/// Upper bound on plasma transfer efficiency. Empirical calibration.
pub const DEFAULT_EFFICIENCY_CAP: f64 = 0.95;

/// Residual specific energy never drops below this fraction of the
/// undiscounted value, however hot the surface. Empirical calibration.
pub const DEFAULT_RESIDUAL_ENERGY_FRACTION: f64 = 0.1;

/// Absorptivity gain per unit damage fraction.
pub const DEFAULT_DAMAGE_ABSORPTION_GAIN: f64 = 3.0;
