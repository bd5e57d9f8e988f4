// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Library Root
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coupled acoustic / laser / plasma rock-drilling simulator.
//!
//! Acoustic pre-stress damages the rock, the pulsed laser heats the
//! damaged surface, and once the surface passes the activation
//! temperature the plasma torch removes material. [`DrillingSimulator`]
//! integrates the three on a fixed time step and records a [`History`].
//!
//! [`DrillingSimulator`]: simulator::DrillingSimulator
//! [`History`]: trifecta_types::state::History

pub mod acoustic;
pub mod export;
pub mod plasma;
pub mod runner;
pub mod simulator;
pub mod stress;
pub mod summary;
pub mod sweep;
pub mod thermal;
pub mod validation;
