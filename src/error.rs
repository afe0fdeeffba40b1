//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by plan generation and persistence.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The request failed input validation.
    #[error("invalid progression request: {}", join_messages(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// A formula tag did not match any known formula type.
    #[error("unknown formula type: {0:?}")]
    UnknownFormula(String),

    /// A plan or request could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    /// Validation errors carried by an [`PlanError::InvalidRequest`].
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            PlanError::InvalidRequest(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
