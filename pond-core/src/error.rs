//! Error types for the pond analysis workflow.
//!
//! Validation failures stay local to the parameter form, prediction failures
//! carry the single message shown to the user, and workflow errors wrap both
//! together with the session-level conditions (busy, cancelled, bad index).

use crate::parameters::ParameterField;

/// A parameter failed pre-flight validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: ParameterField,
    pub reason: String,
}

impl ValidationError {
    pub fn not_a_number(field: ParameterField) -> Self {
        Self {
            field,
            reason: format!("{} must be a valid number", field.label()),
        }
    }

    pub fn out_of_range(field: ParameterField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// The remote prediction call failed or returned an unusable payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct PredictionError {
    pub message: String,
}

impl PredictionError {
    /// Message used when neither the response nor the transport explains the failure.
    pub const FALLBACK_MESSAGE: &'static str = "Failed to get prediction";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK_MESSAGE)
    }
}

/// Errors surfaced at the workflow boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ValidationError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    #[error("A prediction is already in flight")]
    Busy,

    #[error("Analysis session was torn down")]
    Cancelled,

    #[error("No history entry at index {0}")]
    NoSuchEntry(usize),

    #[error("No prediction to show yet")]
    NoResults,
}
