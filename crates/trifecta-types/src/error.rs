// ─────────────────────────────────────────────────────────────────────
// Trifecta Drill Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Material '{name}' not found. Available: {available}")]
    UnknownMaterial { name: String, available: String },

    #[error("Numeric anomaly at step {step}: {message}")]
    NumericAnomaly { step: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DrillError {
    /// True for errors raised before a run starts (bad parameters, unknown material).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DrillError::InvalidConfiguration(_) | DrillError::UnknownMaterial { .. }
        )
    }
}

pub type DrillResult<T> = Result<T, DrillError>;
