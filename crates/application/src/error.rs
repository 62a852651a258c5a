//! Application error types.

use common::OrderId;
use domain::OrderError;
use storage::StorageError;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors surfaced by command and query handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Boundary validation rejected the input.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The aggregate rejected the operation.
    #[error(transparent)]
    Domain(#[from] OrderError),

    /// No order with the given identifier exists.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The storage layer could not complete the operation. Propagated
    /// without retry.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl AppError {
    /// Returns true for errors caused by invalid caller input
    /// (as opposed to state conflicts, missing aggregates, or storage
    /// failures).
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            AppError::Validation(_) => true,
            AppError::Domain(err) => !err.is_state_error(),
            _ => false,
        }
    }
}
