//! Storage collaborator interfaces.
//!
//! The domain layer defines the data-access interfaces it needs; the
//! infrastructure layer provides the concrete implementations (dependency
//! inversion). The hub treats persistent storage of users, sessions and
//! messages as an external collaborator behind these traits.

use async_trait::async_trait;

use super::error::StorageError;
use super::identity::{MessageId, SessionId, UserId};
use super::message::SessionMessage;
use super::session::{SessionRecord, UserRecord};

/// Account lookup, used by connection authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StorageError>;
}

/// Session lookup, used for room authorization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRecord>, StorageError>;
}

/// Message persistence for chat and Q&A content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: SessionMessage) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<SessionMessage>, StorageError>;

    /// Persist a mutated message (reactions, votes, answer). The message must
    /// already exist.
    async fn update(&self, message: SessionMessage) -> Result<(), StorageError>;
}
