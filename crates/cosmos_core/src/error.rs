use thiserror::Error;

use crate::types::LocationId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CosmosError {
    /// A structural invariant could not be satisfied while deriving a location
    #[error("construction failed: {0}")]
    Construction(String),

    /// The open-space search ran out of attempts
    #[error("no open space for a body of radius {radius:e} m after {attempts} attempts")]
    PlacementExhausted { radius: f64, attempts: u32 },

    #[error("orbit references {0}, which is not reachable from the orbiting location")]
    OrphanOrbitReference(LocationId),

    #[error("unknown location {0}")]
    UnknownLocation(LocationId),

    #[error("location {0} already has a parent")]
    AlreadyParented(LocationId),
}

impl CosmosError {
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CosmosError>;

/// Reject zero, negative and non-finite lengths
pub fn require_positive(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CosmosError::construction(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}
