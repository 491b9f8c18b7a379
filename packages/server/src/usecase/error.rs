//! Use-case error types.
//!
//! Every failure is handled locally by the event handler that detected it:
//! the offending client gets an `error` event, nothing is broadcast, and the
//! connection stays open. Only authentication failures reject a connection.

use thiserror::Error;

use crate::domain::{DomainError, StorageError};

/// Connection-time authentication failures. These reject the socket before
/// any event handler runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticateError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("account is deactivated")]
    Deactivated,
}

/// Failures of chat/Q&A content actions, returned to the caller only.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("session not found")]
    SessionNotFound,

    #[error("message not found")]
    MessageNotFound,

    #[error("question not found")]
    QuestionNotFound,

    #[error("not registered for this session")]
    NotRegistered,

    #[error("not authorized to answer questions")]
    NotAuthorized,

    #[error(transparent)]
    InvalidContent(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of directed deliveries (signaling, private messages).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("not in the video room for this session")]
    NotInVideoRoom,

    #[error("recipient '{0}' is not available")]
    RecipientUnavailable(String),

    #[error(transparent)]
    InvalidContent(#[from] DomainError),
}
