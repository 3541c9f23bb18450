//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed value object input (e.g. an email address)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Blank or otherwise unusable identifier
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Entity argument rejected by an invariant
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not allowed in the entity's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entity not found
    #[error("{0} not found")]
    NotFound(String),

    /// Email address already taken by another user
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),
}

impl DomainError {
    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        DomainError::InvalidFormat(msg.into())
    }

    /// Create an invalid id error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        DomainError::InvalidId(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DomainError::InvalidArgument(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        DomainError::InvalidState(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a duplicate email error
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        DomainError::DuplicateEmail(email.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
