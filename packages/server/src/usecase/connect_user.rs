//! UseCase: user connection.
//!
//! Registers the connection with the pusher and the presence registry
//! (last-connection-wins), announces the arrival to everyone else, and
//! seeds the new connection with the current online snapshot.

use std::sync::Arc;

use crate::domain::{
    ConnectionIdentity, EventPusher, OnlineUser, PresenceRegistry, PusherChannel,
};
use crate::infrastructure::dto::websocket::{OnlineUserDto, ServerEvent};

pub struct ConnectUserUseCase {
    presence: Arc<dyn PresenceRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl ConnectUserUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { presence, pusher }
    }

    pub async fn execute(&self, identity: &ConnectionIdentity, sender: PusherChannel) {
        // 1. Attach the sender so deliveries can reach this connection.
        self.pusher
            .register(
                identity.user_id.clone(),
                identity.connection_id,
                sender,
            )
            .await;

        // 2. Record presence (replaces any prior entry for this user).
        self.presence
            .register(OnlineUser::from_identity(identity))
            .await;

        let online = self.presence.list_online().await;

        // 3. Announce to everyone else.
        let connected = ServerEvent::UserConnected {
            id: identity.user_id.as_str().to_string(),
            name: identity.display_name.clone(),
            role: identity.role,
        };
        let others: Vec<_> = online
            .iter()
            .filter(|u| u.user_id != identity.user_id)
            .map(|u| u.user_id.clone())
            .collect();
        self.pusher.broadcast(others, &connected.to_json()).await;

        // 4. Seed the new connection with the online snapshot.
        let snapshot = ServerEvent::UsersOnline {
            users: online.iter().map(OnlineUserDto::from_online).collect(),
        };
        if let Err(e) = self
            .pusher
            .push_to(&identity.user_id, &snapshot.to_json())
            .await
        {
            tracing::warn!(
                "Failed to send online snapshot to '{}': {}",
                identity.user_id,
                e
            );
        }

        tracing::info!(
            "User connected: {} ({})",
            identity.display_name,
            identity.user_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};
    use crate::infrastructure::registry::InMemoryPresenceRegistry;
    use crate::usecase::testing::{RecordingPusher, identity};
    use tokio::sync::mpsc;

    fn usecase() -> (
        ConnectUserUseCase,
        Arc<InMemoryPresenceRegistry>,
        Arc<RecordingPusher>,
    ) {
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let pusher = Arc::new(RecordingPusher::new());
        let usecase = ConnectUserUseCase::new(presence.clone(), pusher.clone());
        (usecase, presence, pusher)
    }

    #[tokio::test]
    async fn test_connect_registers_presence_and_sends_snapshot() {
        // given:
        let (usecase, presence, pusher) = usecase();
        let alice = identity("alice", Role::Attendee);
        let (tx, _rx) = mpsc::unbounded_channel();

        // when:
        usecase.execute(&alice, tx).await;

        // then: presence recorded
        assert_eq!(presence.list_online().await.len(), 1);

        // and alice got the users-online snapshot
        let pushed = pusher.pushed().await;
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].0, UserId::new("alice"));
        assert!(pushed[0].1.contains(r#""type":"users-online""#));
    }

    #[tokio::test]
    async fn test_connect_announces_to_other_users_only() {
        // given: bob is already online
        let (usecase, _presence, pusher) = usecase();
        let bob = identity("bob", Role::Attendee);
        let (bob_tx, _bob_rx) = mpsc::unbounded_channel();
        usecase.execute(&bob, bob_tx).await;

        // when: alice connects
        let alice = identity("alice", Role::Attendee);
        let (tx, _rx) = mpsc::unbounded_channel();
        usecase.execute(&alice, tx).await;

        // then: the user-connected announcement targeted bob, not alice
        let broadcasts = pusher.broadcasts().await;
        let announcement = broadcasts
            .iter()
            .find(|(_, payload)| {
                payload.contains(r#""type":"user-connected""#)
                    && payload.contains(r#""id":"alice""#)
            })
            .expect("user-connected broadcast for alice");
        assert_eq!(announcement.0, vec![UserId::new("bob")]);
    }
}
