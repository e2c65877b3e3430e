//! Error type shared by sampling, placement, and map comparison.
//!
//! Soft conditions (requested count above the candidate pool, non-positive
//! length samples) are not errors: they are recorded on the realized data and
//! logged. Only conditions that must stop a generation step live here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FractureError {
    /// Distribution name not recognized for the given family
    /// (`orientation`, `length`, `spacing`).
    #[error("invalid {family} distribution: {name:?}")]
    InvalidDistribution { family: &'static str, name: String },

    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },

    /// Two maps lack structural parity (canvas size or group count).
    #[error("incompatible maps: {reason}")]
    IncompatibleMaps { reason: String },
}

impl FractureError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        Self::IncompatibleMaps {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FractureError>;
