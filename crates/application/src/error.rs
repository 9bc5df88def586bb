//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (validation, not found)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The underlying store rejected a statement; the message is the driver's
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if a record failed validation
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(DomainError::ValidationError(_)))
    }

    /// Check if the targeted key does not exist
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound { .. }))
    }
}
