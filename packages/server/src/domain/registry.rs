//! Presence and room-membership interfaces.
//!
//! Chat and Q&A rooms are plain membership sets: fan-out only ever needs
//! "send to room", so no identity details are tracked per member. The video
//! room additionally keeps an explicit roster because each joining peer must
//! discover the identities of existing peers to set up a WebRTC connection
//! with each. The two shapes are deliberately distinct interfaces rather
//! than one generic room abstraction.

use async_trait::async_trait;

use super::identity::{ConnectionId, OnlineUser, Role, SessionId, UserId};

/// Process-wide registry of connected identities.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Insert the entry, replacing any prior entry for the same user
    /// (last-connection-wins).
    async fn register(&self, user: OnlineUser);

    /// Remove the entry if it still belongs to the given connection.
    /// Returns `true` when an entry was actually removed; a stale socket's
    /// teardown after a reconnect returns `false` and changes nothing.
    async fn unregister(&self, user_id: &UserId, connection_id: &ConnectionId) -> bool;

    /// Snapshot of everyone currently online, in no particular order.
    async fn list_online(&self) -> Vec<OnlineUser>;
}

/// Broadcast-only channel kinds (membership set, no roster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicChannel {
    Chat,
    Qa,
}

impl TopicChannel {
    /// Room name for logging, e.g. `chat-sess1`.
    pub fn room_name(&self, session_id: &SessionId) -> String {
        match self {
            TopicChannel::Chat => format!("chat-{session_id}"),
            TopicChannel::Qa => format!("qa-{session_id}"),
        }
    }
}

/// A member of a session's video room, as published in roster snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoParticipant {
    pub user_id: UserId,
    pub display_name: String,
    pub role: Role,
}

/// Per-session room membership across the three channel types.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add the user to a chat/qa membership set. Idempotent.
    async fn join_topic(&self, channel: TopicChannel, session_id: &SessionId, user_id: &UserId);

    /// Remove the user from a chat/qa membership set.
    async fn leave_topic(&self, channel: TopicChannel, session_id: &SessionId, user_id: &UserId);

    /// Current members of a chat/qa room.
    async fn topic_members(&self, channel: TopicChannel, session_id: &SessionId) -> Vec<UserId>;

    /// Add the participant to a session's video roster, deduplicated by user
    /// id, and return the updated full roster.
    async fn join_video(
        &self,
        session_id: &SessionId,
        participant: VideoParticipant,
    ) -> Vec<VideoParticipant>;

    /// Remove the user from a session's video roster and return the
    /// remaining roster.
    async fn leave_video(&self, session_id: &SessionId, user_id: &UserId)
    -> Vec<VideoParticipant>;

    /// Current roster of a session's video room.
    async fn video_roster(&self, session_id: &SessionId) -> Vec<VideoParticipant>;

    /// Whether the user is currently in the session's video room.
    async fn is_video_member(&self, session_id: &SessionId, user_id: &UserId) -> bool;

    /// Remove the user from every room they occupy (disconnect
    /// reconciliation). Returns, for each video room the user was in, the
    /// session id and the remaining roster so the caller can notify it.
    async fn remove_everywhere(&self, user_id: &UserId) -> Vec<(SessionId, Vec<VideoParticipant>)>;
}
