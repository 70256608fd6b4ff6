//! Domain-level errors.
//!
//! These errors represent business rule violations detected while building
//! or mutating entities. They are independent of infrastructure concerns
//! (HTTP, database, message bus).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field or identifier failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// An unknown value was supplied for an enumerated field
    #[error("Unknown {field} value: {value}")]
    UnknownValue { field: &'static str, value: String },
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an unknown-value error for an enumerated field
    pub fn unknown_value(field: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownValue {
            field,
            value: value.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
