//! Validation error taxonomy
//!
//! Expected validation failures are returned as values. Infrastructure
//! failures (file IO, table parsing, server startup) go through `anyhow`.

use serde::Serialize;

use crate::categories::WasteCategory;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImpactError {
    /// Weight absent, zero, negative, non-finite, non-numeric, or large
    /// enough that its savings overflow
    #[error(
        "invalid weight {}: weight_kg must be a finite number greater than 0 with representable savings",
        describe_weight(.weight)
    )]
    InvalidWeight { weight: Option<f64> },

    /// Normalized label is not in the closed category set
    #[error("unknown waste type '{waste_type}'; valid types are: {}", WasteCategory::valid_labels())]
    UnknownCategory { waste_type: String },

    /// Request body (or batch `items`) has the wrong shape
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl ImpactError {
    /// Stable machine-readable tag
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImpactError::InvalidWeight { .. } => ErrorKind::InvalidWeight,
            ImpactError::UnknownCategory { .. } => ErrorKind::UnknownCategory,
            ImpactError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        ImpactError::InvalidInput { reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidWeight,
    UnknownCategory,
    InvalidInput,
}

fn describe_weight(weight: &Option<f64>) -> String {
    match weight {
        Some(w) => w.to_string(),
        None => "(missing)".to_string(),
    }
}
