//! Domain-specific error types and error handling.
//!
//! Infrastructure failures are `DomainError` values and travel through `Err`.
//! Business-rule rejections (`IssueFailure`, `VerifyFailure`) are ordinary
//! outcomes that callers branch on to render feedback.

mod types;

pub use types::{IssueFailure, VerifyFailure};

use thiserror::Error;

/// Core domain errors raised by infrastructure collaborators
#[derive(Error, Debug)]
pub enum DomainError {
    /// The credential store is unreachable or rejected the query
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Hashing or hash verification failed (e.g. a malformed stored hash)
    #[error("Hashing error: {message}")]
    Hashing { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = DomainError::storage("connection refused");
        assert_eq!(error.to_string(), "Storage error: connection refused");
        assert!(matches!(error, DomainError::Storage { .. }));
    }
}
