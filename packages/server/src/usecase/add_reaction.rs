//! UseCase: emoji reactions on chat messages.

use std::sync::Arc;

use crate::domain::{
    ConnectionIdentity, EventPusher, MessageId, MessageStore, RoomRegistry, SessionStore,
    TopicChannel,
};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::ContentError;

pub struct AddReactionUseCase {
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl AddReactionUseCase {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        messages: Arc<dyn MessageStore>,
        rooms: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn EventPusher>,
    ) -> Self {
        Self {
            sessions,
            messages,
            rooms,
            pusher,
        }
    }

    /// Increment the reaction counter on a stored message and publish the
    /// updated counter map to the message's chat room.
    ///
    /// The room is resolved from the stored message, not from whatever
    /// session the client claims.
    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        message_id: MessageId,
        reaction: String,
    ) -> Result<(), ContentError> {
        let mut message = self
            .messages
            .find_by_id(&message_id)
            .await?
            .ok_or(ContentError::MessageNotFound)?;

        let session = self
            .sessions
            .find_by_id(&message.session_id)
            .await?
            .ok_or(ContentError::SessionNotFound)?;
        if !session.allows(&identity.user_id, identity.role) {
            return Err(ContentError::NotRegistered);
        }

        message.add_reaction(&reaction);
        let reactions = message.reactions.clone();
        let session_id = message.session_id.clone();
        self.messages.update(message).await?;

        let targets = self
            .rooms
            .topic_members(TopicChannel::Chat, &session_id)
            .await;
        let event = ServerEvent::MessageReaction {
            message_id: message_id.as_str().to_string(),
            reactions,
        };
        self.pusher.broadcast(targets, &event.to_json()).await;
        Ok(())
    }
}
