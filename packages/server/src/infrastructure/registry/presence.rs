//! In-memory presence registry.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{ConnectionId, OnlineUser, PresenceRegistry, UserId};
use tokio::sync::Mutex;

/// Process-wide map of connected identities.
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    online: Mutex<HashMap<UserId, OnlineUser>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self {
            online: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(&self, user: OnlineUser) {
        let mut online = self.online.lock().await;
        let user_id = user.user_id.clone();
        if online.insert(user_id.clone(), user).is_some() {
            tracing::debug!("Presence entry for '{}' replaced on reconnect", user_id);
        }
    }

    async fn unregister(&self, user_id: &UserId, connection_id: &ConnectionId) -> bool {
        let mut online = self.online.lock().await;
        // Remove only if the entry still belongs to the departing socket.
        if online
            .get(user_id)
            .is_some_and(|u| u.connection_id == *connection_id)
        {
            online.remove(user_id);
            true
        } else {
            false
        }
    }

    async fn list_online(&self) -> Vec<OnlineUser> {
        let online = self.online.lock().await;
        online.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OnlineStatus, Role};

    fn online_user(id: &str, connection_id: ConnectionId) -> OnlineUser {
        OnlineUser {
            user_id: UserId::new(id),
            display_name: id.to_string(),
            role: Role::Attendee,
            connection_id,
            status: OnlineStatus::Online,
        }
    }

    #[tokio::test]
    async fn test_register_then_unregister_leaves_no_entry() {
        // given:
        let registry = InMemoryPresenceRegistry::new();
        let conn = ConnectionId::generate();
        registry.register(online_user("alice", conn)).await;

        // when:
        let removed = registry.unregister(&UserId::new("alice"), &conn).await;

        // then:
        assert!(removed);
        assert!(registry.list_online().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_replaces_prior_entry_for_same_user() {
        // given:
        let registry = InMemoryPresenceRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        registry.register(online_user("alice", first)).await;

        // when: alice reconnects
        registry.register(online_user("alice", second)).await;

        // then: one entry, bound to the new connection
        let online = registry.list_online().await;
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].connection_id, second);
    }

    #[tokio::test]
    async fn test_stale_unregister_does_not_evict_reconnected_entry() {
        // given: alice reconnected before the old socket tore down
        let registry = InMemoryPresenceRegistry::new();
        let stale = ConnectionId::generate();
        let fresh = ConnectionId::generate();
        registry.register(online_user("alice", stale)).await;
        registry.register(online_user("alice", fresh)).await;

        // when: the stale socket's teardown runs
        let removed = registry.unregister(&UserId::new("alice"), &stale).await;

        // then: no-op; alice stays online
        assert!(!removed);
        assert_eq!(registry.list_online().await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_online_snapshots_all_entries() {
        // given:
        let registry = InMemoryPresenceRegistry::new();
        registry
            .register(online_user("alice", ConnectionId::generate()))
            .await;
        registry
            .register(online_user("bob", ConnectionId::generate()))
            .await;

        // when:
        let online = registry.list_online().await;

        // then:
        assert_eq!(online.len(), 2);
    }
}
