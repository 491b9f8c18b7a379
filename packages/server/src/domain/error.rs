//! Domain-level error types.

use thiserror::Error;

/// Validation errors raised by value-object constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("content must not be empty")]
    EmptyContent,

    #[error("content exceeds the maximum length of {limit} characters")]
    ContentTooLong { limit: usize },
}

/// Errors returned by the storage collaborators.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned when pushing an event to a specific connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),
}
