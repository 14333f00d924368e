//! Error types for layer edits.

use crate::layer::LayerId;
use thiserror::Error;

/// Failure of a layer-tree or transform operation.
///
/// Editor entry points never surface these to the user: a missing layer or a
/// precondition that does not hold turns the whole operation into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Layer not found: {0}")]
    NotFound(LayerId),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;
