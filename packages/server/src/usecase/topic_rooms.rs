//! UseCase: chat/Q&A room membership.
//!
//! Join and leave are cheap and idempotent, and carry no authorization
//! check of their own: content events are authorized when sent. No roster
//! is tracked for these channels.

use std::sync::Arc;

use crate::domain::{ConnectionIdentity, RoomRegistry, SessionId, TopicChannel};

pub struct TopicRoomUseCase {
    rooms: Arc<dyn RoomRegistry>,
}

impl TopicRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>) -> Self {
        Self { rooms }
    }

    pub async fn join(
        &self,
        identity: &ConnectionIdentity,
        channel: TopicChannel,
        session_id: &SessionId,
    ) {
        self.rooms
            .join_topic(channel, session_id, &identity.user_id)
            .await;
        tracing::info!(
            "{} joined {}",
            identity.display_name,
            channel.room_name(session_id)
        );
    }

    pub async fn leave(
        &self,
        identity: &ConnectionIdentity,
        channel: TopicChannel,
        session_id: &SessionId,
    ) {
        self.rooms
            .leave_topic(channel, session_id, &identity.user_id)
            .await;
        tracing::info!(
            "{} left {}",
            identity.display_name,
            channel.room_name(session_id)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use crate::usecase::testing::identity;

    #[tokio::test]
    async fn test_join_then_leave_round_trips_membership() {
        // given:
        let rooms = Arc::new(InMemoryRoomRegistry::new());
        let usecase = TopicRoomUseCase::new(rooms.clone());
        let alice = identity("alice", Role::Attendee);
        let session = SessionId::new("sess1");

        // when:
        usecase.join(&alice, TopicChannel::Chat, &session).await;

        // then:
        assert_eq!(
            rooms.topic_members(TopicChannel::Chat, &session).await,
            vec![UserId::new("alice")]
        );

        // when:
        usecase.leave(&alice, TopicChannel::Chat, &session).await;

        // then:
        assert!(
            rooms
                .topic_members(TopicChannel::Chat, &session)
                .await
                .is_empty()
        );
    }
}
