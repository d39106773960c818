use thiserror::Error;

use super::classifier::ClassifierError;
use crate::reference::ReferenceError;

/// Failure kinds surfaced to the transport adapters.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// Caller omitted or malformed the symptom payload.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model or reference tables could not be loaded or disagree.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The classifier raised during inference.
    #[error("Prediction failed: {0}")]
    Failure(#[from] ClassifierError),
}

impl From<ReferenceError> for PredictionError {
    fn from(err: ReferenceError) -> Self {
        PredictionError::UpstreamUnavailable(err.to_string())
    }
}
