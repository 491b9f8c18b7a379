//! UseCase: Q&A question submission.

use std::sync::Arc;

use rostrum_shared::time::Clock;

use crate::domain::{
    ConnectionIdentity, EventPusher, MessageAuthor, MessageBody, MessageStore, RoomRegistry,
    SessionId, SessionMessage, SessionStore, TopicChannel,
};
use crate::infrastructure::dto::websocket::{QuestionDto, ServerEvent};

use super::error::ContentError;

pub struct SubmitQuestionUseCase {
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
    clock: Arc<dyn Clock>,
}

impl SubmitQuestionUseCase {
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

    /// Persist a question and broadcast it to the session's Q&A room.
    ///
    /// An anonymous submission stores no author at all, so later reads
    /// cannot leak the submitter either.
    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        session_id: SessionId,
        question: String,
        category: Option<String>,
        is_anonymous: bool,
    ) -> Result<(), ContentError> {
        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(ContentError::SessionNotFound)?;
        if !session.allows(&identity.user_id, identity.role) {
            return Err(ContentError::NotRegistered);
        }

        let body = MessageBody::question(question)?;
        let author = (!is_anonymous).then(|| MessageAuthor {
            id: identity.user_id.clone(),
            name: identity.display_name.clone(),
            role: identity.role,
        });
        let question = SessionMessage::question(
            session_id.clone(),
            author,
            body,
            category,
            self.clock.now_millis(),
        );
        let dto = QuestionDto::from_question(&question);
        self.messages.insert(question).await?;

        let targets = self
            .rooms
            .topic_members(TopicChannel::Qa, &session_id)
            .await;
        self.pusher
            .broadcast(targets, &ServerEvent::NewQuestion(dto).to_json())
            .await;
        Ok(())
    }
}
