//! UseCase: WebRTC signaling relay.
//!
//! The server never inspects SDP or ICE payloads; it only checks that both
//! ends are members of the same video room and forwards the opaque JSON to
//! the addressed peer.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionIdentity, EventPusher, RoomRegistry, SessionId, UserId};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::RelayError;

/// Which signaling leg is being forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

pub struct SignalRelayUseCase {
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl SignalRelayUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { rooms, pusher }
    }

    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        kind: SignalKind,
        session_id: SessionId,
        to: UserId,
        payload: Value,
    ) -> Result<(), RelayError> {
        if !self
            .rooms
            .is_video_member(&session_id, &identity.user_id)
            .await
        {
            return Err(RelayError::NotInVideoRoom);
        }
        if !self.rooms.is_video_member(&session_id, &to).await
            || !self.pusher.is_connected(&to).await
        {
            return Err(RelayError::RecipientUnavailable(to.as_str().to_string()));
        }

        let from = identity.user_id.as_str().to_string();
        let event = match kind {
            SignalKind::Offer => ServerEvent::Offer { from, payload },
            SignalKind::Answer => ServerEvent::Answer { from, payload },
            SignalKind::IceCandidate => ServerEvent::IceCandidate { from, payload },
        };
        if let Err(err) = self.pusher.push_to(&to, &event.to_json()).await {
            tracing::warn!(to = %to, "failed to relay signal: {err}");
            return Err(RelayError::RecipientUnavailable(to.as_str().to_string()));
        }
        Ok(())
    }
}
