//! UseCase: video room membership and call announcements.
//!
//! Every join and leave publishes a full roster snapshot, never an
//! incremental diff, so clients always reconcile from a consistent total
//! view. The snapshot goes to every member including the one who triggered
//! the change.

use std::sync::Arc;

use crate::domain::{
    ConnectionIdentity, EventPusher, RoomRegistry, SessionId, UserId, VideoParticipant,
};
use crate::infrastructure::dto::websocket::{ServerEvent, VideoParticipantDto};

pub struct VideoRoomUseCase {
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl VideoRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { rooms, pusher }
    }

    pub async fn join(&self, identity: &ConnectionIdentity, session_id: &SessionId) {
        let roster = self
            .rooms
            .join_video(
                session_id,
                VideoParticipant {
                    user_id: identity.user_id.clone(),
                    display_name: identity.display_name.clone(),
                    role: identity.role,
                },
            )
            .await;
        self.publish_roster(session_id, &roster).await;
        tracing::info!(
            "{} joined video room for session {}",
            identity.display_name,
            session_id
        );
    }

    pub async fn leave(&self, identity: &ConnectionIdentity, session_id: &SessionId) {
        let remaining = self
            .rooms
            .leave_video(session_id, &identity.user_id)
            .await;
        self.publish_roster(session_id, &remaining).await;
        tracing::info!(
            "{} left video room for session {}",
            identity.display_name,
            session_id
        );
    }

    /// Announce that the user started streaming. Sent to the other members
    /// only; the caller knows its own state.
    pub async fn announce_call_join(
        &self,
        identity: &ConnectionIdentity,
        session_id: &SessionId,
        user_data: serde_json::Value,
    ) {
        let event = ServerEvent::UserJoinedVideo {
            user_id: identity.user_id.as_str().to_string(),
            user_data,
            initiator: true,
        };
        let targets = self.other_members(session_id, &identity.user_id).await;
        self.pusher.broadcast(targets, &event.to_json()).await;
    }

    pub async fn announce_call_leave(&self, identity: &ConnectionIdentity, session_id: &SessionId) {
        let event = ServerEvent::UserLeftVideo {
            user_id: identity.user_id.as_str().to_string(),
        };
        let targets = self.other_members(session_id, &identity.user_id).await;
        self.pusher.broadcast(targets, &event.to_json()).await;
    }

    async fn publish_roster(&self, session_id: &SessionId, roster: &[VideoParticipant]) {
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

    async fn other_members(&self, session_id: &SessionId, except: &UserId) -> Vec<UserId> {
        self.rooms
            .video_roster(session_id)
            .await
            .into_iter()
            .map(|p| p.user_id)
            .filter(|id| id != except)
            .collect()
    }
}
