//! UseCase: user disconnection.
//!
//! Reconciles presence and every room the user occupied, notifying each
//! affected video room with a fresh roster snapshot. A stale socket (one
//! whose user has already reconnected) tears down nothing: the fresh
//! connection owns the presence entry and the room memberships.

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, PresenceRegistry, RoomRegistry, UserId};
use crate::infrastructure::dto::websocket::{ServerEvent, VideoParticipantDto};

pub struct DisconnectUserUseCase {
    presence: Arc<dyn PresenceRegistry>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl DisconnectUserUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        rooms: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn EventPusher>,
    ) -> Self {
        Self {
            presence,
            rooms,
            pusher,
        }
    }

    pub async fn execute(&self, user_id: &UserId, connection_id: &ConnectionId) {
        let removed = self.presence.unregister(user_id, connection_id).await;
        self.pusher.unregister(user_id, connection_id).await;

        if !removed {
            tracing::debug!(
                "Stale socket for '{}' closed after reconnect, nothing to reconcile",
                user_id
            );
            return;
        }

        // Leave every room; each affected video room gets a roster snapshot.
        let affected = self.rooms.remove_everywhere(user_id).await;
        for (session_id, roster) in affected {
            let update = ServerEvent::ParticipantsUpdated {
                session_id: session_id.as_str().to_string(),
                participants: roster
                    .iter()
                    .map(VideoParticipantDto::from_participant)
                    .collect(),
            };
            let targets = roster.iter().map(|p| p.user_id.clone()).collect();
            self.pusher.broadcast(targets, &update.to_json()).await;
        }

        // Announce the departure to everyone still online.
        let departed = ServerEvent::UserDisconnected {
            user_id: user_id.as_str().to_string(),
        };
        let remaining = self
            .presence
            .list_online()
            .await
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        self.pusher.broadcast(remaining, &departed.to_json()).await;

        tracing::info!("User disconnected: {}", user_id);
    }
}
