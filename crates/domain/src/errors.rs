//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A record failed a validator or its field constraints
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Date parsing error
    #[error("Invalid date: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Expert", 42);
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Expert");
                assert_eq!(id, "42");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("GrntiCode", 5);
        assert_eq!(err.to_string(), "GrntiCode not found: 5");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::invalid("Invalid expert data");
        assert_eq!(err.to_string(), "Validation failed: Invalid expert data");
    }

    #[test]
    fn invalid_datetime_error_message() {
        let err = DomainError::InvalidDateTime("31.02.2024".to_string());
        assert_eq!(err.to_string(), "Invalid date: 31.02.2024");
    }
}
