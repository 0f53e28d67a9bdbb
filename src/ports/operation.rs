//! Shared outcome type for asynchronous operations (device linking, submit).

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Failure of an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The requesting view went away before the operation finished.
    #[error("operation cancelled")]
    Cancelled,

    /// The operation ran and failed.
    #[error("{operation} failed: {reason}")]
    Failed { operation: String, reason: String },
}

impl OperationError {
    pub fn failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        OperationError::Failed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OperationError::Cancelled => ErrorCode::OperationCancelled,
            OperationError::Failed { .. } => ErrorCode::OperationFailed,
        }
    }
}
