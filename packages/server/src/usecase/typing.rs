//! UseCase: typing indicator relay.
//!
//! Pure fan-out to the chat room, sender excluded. Typing state is never
//! stored server-side; a client that misses an indicator just renders
//! without it.

use std::sync::Arc;

use crate::domain::{
    ConnectionIdentity, EventPusher, RoomRegistry, SessionId, SessionStore, TopicChannel,
};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::ContentError;

pub struct TypingUseCase {
    sessions: Arc<dyn SessionStore>,
    rooms: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl TypingUseCase {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        rooms: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn EventPusher>,
    ) -> Self {
        Self {
            sessions,
            rooms,
            pusher,
        }
    }

    pub async fn started(
        &self,
        identity: &ConnectionIdentity,
        session_id: SessionId,
        user_name: String,
    ) -> Result<(), ContentError> {
        self.authorize(identity, &session_id).await?;
        let event = ServerEvent::UserTyping {
            user_id: identity.user_id.as_str().to_string(),
            user_name,
        };
        self.relay(identity, &session_id, event).await;
        Ok(())
    }

    pub async fn stopped(
        &self,
        identity: &ConnectionIdentity,
        session_id: SessionId,
    ) -> Result<(), ContentError> {
        self.authorize(identity, &session_id).await?;
        let event = ServerEvent::UserStoppedTyping {
            user_id: identity.user_id.as_str().to_string(),
        };
        self.relay(identity, &session_id, event).await;
        Ok(())
    }

    async fn authorize(
        &self,
        identity: &ConnectionIdentity,
        session_id: &SessionId,
    ) -> Result<(), ContentError> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(ContentError::SessionNotFound)?;
        if !session.allows(&identity.user_id, identity.role) {
            return Err(ContentError::NotRegistered);
        }
        Ok(())
    }

    async fn relay(
        &self,
        identity: &ConnectionIdentity,
        session_id: &SessionId,
        event: ServerEvent,
    ) {
        let targets: Vec<_> = self
            .rooms
            .topic_members(TopicChannel::Chat, session_id)
            .await
            .into_iter()
            .filter(|member| member != &identity.user_id)
            .collect();
        self.pusher.broadcast(targets, &event.to_json()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SessionRecord, UserId};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use crate::infrastructure::repository::InMemorySessionStore;
    use crate::usecase::testing::{RecordingPusher, identity};

    async fn fixture() -> (TypingUseCase, Arc<InMemoryRoomRegistry>, Arc<RecordingPusher>) {
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
        let rooms = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(RecordingPusher::new());
        let usecase = TypingUseCase::new(sessions, rooms.clone(), pusher.clone());
        (usecase, rooms, pusher)
    }

    #[tokio::test]
    async fn test_typing_indicator_excludes_sender() {
        // given: alice and bob in the chat room
        let (usecase, rooms, pusher) = fixture().await;
        let session = SessionId::new("sess1");
        rooms
            .join_topic(TopicChannel::Chat, &session, &UserId::new("alice"))
            .await;
        rooms
            .join_topic(TopicChannel::Chat, &session, &UserId::new("bob"))
            .await;

        // when: alice starts typing
        usecase
            .started(
                &identity("alice", Role::Attendee),
                session,
                "Alice".to_string(),
            )
            .await
            .unwrap();

        // then: only bob gets the indicator
        let broadcasts = pusher.broadcasts().await;
        assert_eq!(broadcasts.len(), 1);
        assert_eq!(broadcasts[0].0, vec![UserId::new("bob")]);
        assert!(broadcasts[0].1.contains(r#""type":"user-typing""#));
    }

    #[tokio::test]
    async fn test_typing_from_unregistered_user_is_rejected() {
        let (usecase, _rooms, pusher) = fixture().await;
        let result = usecase
            .started(
                &identity("mallory", Role::Attendee),
                SessionId::new("sess1"),
                "Mallory".to_string(),
            )
            .await;
        assert!(matches!(result, Err(ContentError::NotRegistered)));
        assert!(pusher.broadcasts().await.is_empty());
    }

    #[tokio::test]
    async fn test_stop_typing_reaches_room() {
        let (usecase, rooms, pusher) = fixture().await;
        let session = SessionId::new("sess1");
        rooms
            .join_topic(TopicChannel::Chat, &session, &UserId::new("bob"))
            .await;
        usecase
            .stopped(&identity("alice", Role::Attendee), session)
            .await
            .unwrap();
        let broadcasts = pusher.broadcasts().await;
        assert_eq!(broadcasts.len(), 1);
        assert!(broadcasts[0].1.contains(r#""type":"user-stopped-typing""#));
    }
}
