//! Shared test doubles for the use-case tests.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionIdentity, EventPusher, PushError, PusherChannel, Role, UserId,
};

/// Event pusher that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingPusher {
    connected: Mutex<HashSet<UserId>>,
    pushed: Mutex<Vec<(UserId, String)>>,
    broadcasts: Mutex<Vec<(Vec<UserId>, String)>>,
}

impl RecordingPusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as connected without going through `register`.
    pub async fn connect(&self, user_id: UserId) {
        self.connected.lock().await.insert(user_id);
    }

    /// All `push_to` deliveries so far, in order.
    pub async fn pushed(&self) -> Vec<(UserId, String)> {
        self.pushed.lock().await.clone()
    }

    /// All `broadcast` calls so far, in order.
    pub async fn broadcasts(&self) -> Vec<(Vec<UserId>, String)> {
        self.broadcasts.lock().await.clone()
    }

    /// Every payload that reached the given user, via unicast or broadcast.
    pub async fn received_by(&self, user_id: &UserId) -> Vec<String> {
        let mut received: Vec<String> = self
            .pushed
            .lock()
            .await
            .iter()
            .filter(|(target, _)| target == user_id)
            .map(|(_, payload)| payload.clone())
            .collect();
        received.extend(
            self.broadcasts
                .lock()
                .await
                .iter()
                .filter(|(targets, _)| targets.contains(user_id))
                .map(|(_, payload)| payload.clone()),
        );
        received
    }
}

#[async_trait]
impl EventPusher for RecordingPusher {
    async fn register(&self, user_id: UserId, _connection_id: ConnectionId, _sender: PusherChannel) {
        self.connected.lock().await.insert(user_id);
    }

    async fn unregister(&self, user_id: &UserId, _connection_id: &ConnectionId) {
        self.connected.lock().await.remove(user_id);
    }

    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), PushError> {
        if !self.connected.lock().await.contains(user_id) {
            return Err(PushError::ClientNotFound(user_id.as_str().to_string()));
        }
        self.pushed
            .lock()
            .await
            .push((user_id.clone(), content.to_string()));
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<UserId>, content: &str) {
        self.broadcasts
            .lock()
            .await
            .push((targets, content.to_string()));
    }

    async fn is_connected(&self, user_id: &UserId) -> bool {
        self.connected.lock().await.contains(user_id)
    }
}

/// Identity fixture with a fresh connection id.
pub fn identity(id: &str, role: Role) -> ConnectionIdentity {
    ConnectionIdentity {
        user_id: UserId::new(id),
        display_name: id.to_string(),
        role,
        connection_id: ConnectionId::generate(),
    }
}
