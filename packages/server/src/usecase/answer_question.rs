//! UseCase: answering questions.

use std::sync::Arc;

use rostrum_shared::time::Clock;

use crate::domain::{
    ConnectionIdentity, EventPusher, MessageBody, MessageId, MessageKind, MessageStore,
    QuestionAnswer, RoomRegistry, SessionStore, TopicChannel,
};
use crate::infrastructure::dto::websocket::{AnsweredByDto, ServerEvent};

use super::error::ContentError;

pub struct AnswerQuestionUseCase {
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
    clock: Arc<dyn Clock>,
}

impl AnswerQuestionUseCase {
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

    /// Attach an answer to a question and broadcast it to the Q&A room.
    ///
    /// Only the session speaker or an admin may answer. Answering twice
    /// overwrites; the room always sees the latest answer.
    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        question_id: MessageId,
        answer: String,
    ) -> Result<(), ContentError> {
        let mut question = self
            .messages
            .find_by_id(&question_id)
            .await?
            .filter(|m| m.kind == MessageKind::Question)
            .ok_or(ContentError::QuestionNotFound)?;

        let session = self
            .sessions
            .find_by_id(&question.session_id)
            .await?
            .ok_or(ContentError::SessionNotFound)?;
        if !session.allows_answering(&identity.user_id, identity.role) {
            return Err(ContentError::NotAuthorized);
        }

        let body = MessageBody::answer(answer)?;
        let answered_at = self.clock.now_millis();
        let answer = QuestionAnswer {
            text: body.into_string(),
            answered_by: identity.user_id.clone(),
            answered_by_name: identity.display_name.clone(),
            answered_at,
        };
        let event = ServerEvent::QuestionAnswered {
            id: question_id.as_str().to_string(),
            answer: answer.text.clone(),
            answered_at,
            answered_by: AnsweredByDto {
                id: identity.user_id.as_str().to_string(),
                name: identity.display_name.clone(),
            },
        };
        question.set_answer(answer);
        let session_id = question.session_id.clone();
        self.messages.update(question).await?;

        let targets = self
            .rooms
            .topic_members(TopicChannel::Qa, &session_id)
            .await;
        self.pusher.broadcast(targets, &event.to_json()).await;
        Ok(())
    }
}
