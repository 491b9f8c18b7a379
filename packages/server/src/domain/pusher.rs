//! Event delivery interface.
//!
//! The socket transport registers one sender channel per live connection;
//! use cases address deliveries by user id and never touch the transport
//! directly. Abstracting the broadcaster here keeps the relay logic
//! independent of the single-process WebSocket implementation.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::PushError;
use super::identity::{ConnectionId, UserId};

/// Channel over which serialized events reach one connection's write loop.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers serialized events to connected clients.
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// Register a connection's sender. A second registration for the same
    /// user replaces the previous sender (last-connection-wins).
    async fn register(&self, user_id: UserId, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection's sender, but only if it still belongs to the
    /// given connection; a stale socket's teardown must not detach a
    /// reconnected user.
    async fn unregister(&self, user_id: &UserId, connection_id: &ConnectionId);

    /// Deliver to a single named user. Fails if the user has no live
    /// connection.
    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), PushError>;

    /// Deliver to every target. Individual send failures are tolerated and
    /// logged; a broadcast never fails as a whole.
    async fn broadcast(&self, targets: Vec<UserId>, content: &str);

    /// Whether the user currently has a live connection.
    async fn is_connected(&self, user_id: &UserId) -> bool;
}
