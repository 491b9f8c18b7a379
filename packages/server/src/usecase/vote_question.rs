//! UseCase: question voting.
//!
//! Votes are stored per voter and the counters are always recomputed from
//! the stored set, so a client replaying the same vote can never inflate
//! the count.

use std::sync::Arc;

use crate::domain::{
    ConnectionIdentity, EventPusher, MessageId, MessageKind, MessageStore, RoomRegistry,
    SessionStore, TopicChannel, VoteDirection,
};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::ContentError;

pub struct VoteQuestionUseCase {
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl VoteQuestionUseCase {
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

    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        question_id: MessageId,
        direction: VoteDirection,
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
        if !session.allows(&identity.user_id, identity.role) {
            return Err(ContentError::NotRegistered);
        }

        question.apply_vote(identity.user_id.clone(), direction);
        let counts = question.vote_counts();
        let session_id = question.session_id.clone();
        self.messages.update(question).await?;

        let targets = self
            .rooms
            .topic_members(TopicChannel::Qa, &session_id)
            .await;
        let event = ServerEvent::QuestionUpdated {
            id: question_id.as_str().to_string(),
            upvotes: counts.upvotes,
            downvotes: counts.downvotes,
            net_votes: counts.net(),
        };
        self.pusher.broadcast(targets, &event.to_json()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageBody, Role, SessionId, SessionMessage, SessionRecord, UserId};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use crate::infrastructure::repository::{InMemoryMessageStore, InMemorySessionStore};
    use crate::usecase::testing::{RecordingPusher, identity};

    struct Fixture {
        usecase: VoteQuestionUseCase,
        messages: Arc<InMemoryMessageStore>,
        pusher: Arc<RecordingPusher>,
        question_id: MessageId,
    }

    async fn fixture() -> Fixture {
        let sessions = Arc::new(InMemorySessionStore::new());
        sessions
            .insert(SessionRecord {
                id: SessionId::new("sess1"),
                title: "Keynote".to_string(),
                speaker: UserId::new("spk"),
                attendees: vec![UserId::new("alice"), UserId::new("bob")],
                is_active: true,
            })
            .await;
        let messages = Arc::new(InMemoryMessageStore::new());
        let question = SessionMessage::question(
            SessionId::new("sess1"),
            None,
            MessageBody::question("Why?").unwrap(),
            None,
            2000,
        );
        let question_id = question.id.clone();
        messages.insert(question).await.unwrap();
        let pusher = Arc::new(RecordingPusher::new());
        let usecase = VoteQuestionUseCase::new(
            sessions,
            messages.clone(),
            Arc::new(InMemoryRoomRegistry::new()),
            pusher.clone(),
        );
        Fixture {
            usecase,
            messages,
            pusher,
            question_id,
        }
    }

    #[tokio::test]
    async fn test_repeated_vote_toggles_off() {
        // given:
        let f = fixture().await;
        let alice = identity("alice", Role::Attendee);

        // when: alice upvotes twice
        f.usecase
            .execute(&alice, f.question_id.clone(), VoteDirection::Up)
            .await
            .unwrap();
        f.usecase
            .execute(&alice, f.question_id.clone(), VoteDirection::Up)
            .await
            .unwrap();

        // then: the second broadcast reports zero votes again
        let broadcasts = f.pusher.broadcasts().await;
        assert!(broadcasts[0].1.contains(r#""upvotes":1"#));
        assert!(broadcasts[1].1.contains(r#""upvotes":0"#));
        let stored = f.messages.find_by_id(&f.question_id).await.unwrap().unwrap();
        assert!(stored.vote_of(&UserId::new("alice")).is_none());
    }

    #[tokio::test]
    async fn test_opposite_vote_replaces_not_stacks() {
        // given: alice has an upvote
        let f = fixture().await;
        let alice = identity("alice", Role::Attendee);
        f.usecase
            .execute(&alice, f.question_id.clone(), VoteDirection::Up)
            .await
            .unwrap();

        // when: she switches to a downvote
        f.usecase
            .execute(&alice, f.question_id.clone(), VoteDirection::Down)
            .await
            .unwrap();

        // then: one downvote, no residual upvote
        let broadcasts = f.pusher.broadcasts().await;
        assert!(broadcasts[1].1.contains(r#""upvotes":0"#));
        assert!(broadcasts[1].1.contains(r#""downvotes":1"#));
        assert!(broadcasts[1].1.contains(r#""netVotes":-1"#));
    }

    #[tokio::test]
    async fn test_vote_on_chat_message_is_rejected() {
        // given: a plain chat message, not a question
        let f = fixture().await;
        let chat = SessionMessage::chat(
            SessionId::new("sess1"),
            crate::domain::MessageAuthor {
                id: UserId::new("alice"),
                name: "Alice".to_string(),
                role: Role::Attendee,
            },
            MessageBody::new("hi").unwrap(),
            None,
            2000,
        );
        let chat_id = chat.id.clone();
        f.messages.insert(chat).await.unwrap();

        // when / then:
        let result = f
            .usecase
            .execute(&identity("alice", Role::Attendee), chat_id, VoteDirection::Up)
            .await;
        assert!(matches!(result, Err(ContentError::QuestionNotFound)));
    }
}
