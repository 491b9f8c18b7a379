//! Credential verification interface.
//!
//! The domain only needs "which account does this bearer token belong to";
//! the signing scheme is an infrastructure concern.

use thiserror::Error;

use super::identity::UserId;

/// Raised when a bearer token cannot be resolved to an account id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,
}

/// Verifies a bearer credential presented at connection time.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify the token's signature and expiry and extract the subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
