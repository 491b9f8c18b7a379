//! UseCase: chat message sending.
//!
//! Authorize, persist, then broadcast to the session's chat room including
//! the sender: clients render their own message from the broadcast, so the
//! room has a single source of ordering. A persistence failure aborts before
//! any fan-out.

use std::sync::Arc;

use rostrum_shared::time::Clock;

use crate::domain::{
    ConnectionIdentity, EventPusher, FileAttachment, MessageAuthor, MessageBody, MessageKind,
    MessageStore, RoomRegistry, SessionId, SessionMessage, SessionStore, TopicChannel,
};
use crate::infrastructure::dto::websocket::{MessageDto, ServerEvent};

use super::error::ContentError;

pub struct SendMessageUseCase {
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        messages: Arc<dyn MessageStore>,
        rooms: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn EventPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            messages,
            rooms,
            pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        session_id: SessionId,
        body: String,
        kind: Option<MessageKind>,
        file: Option<FileAttachment>,
    ) -> Result<(), ContentError> {
        // 1. Authorize against the target session.
        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(ContentError::SessionNotFound)?;
        if !session.allows(&identity.user_id, identity.role) {
            return Err(ContentError::NotRegistered);
        }

        // 2. Persist.
        let body = MessageBody::new(body)?;
        let mut message = SessionMessage::chat(
            session_id.clone(),
            MessageAuthor {
                id: identity.user_id.clone(),
                name: identity.display_name.clone(),
                role: identity.role,
            },
            body,
            file,
            self.clock.now_millis(),
        );
        if let Some(kind) = kind {
            message.kind = kind;
        }
        let dto = MessageDto::from_message(&message);
        self.messages.insert(message).await?;

        // 3. Broadcast to the chat room, sender included.
        let targets = self
            .rooms
            .topic_members(TopicChannel::Chat, &session_id)
            .await;
        self.pusher
            .broadcast(targets, &ServerEvent::NewMessage(dto).to_json())
            .await;

        Ok(())
    }
}
