//! WebSocket-backed `EventPusher` implementation.
//!
//! The UI layer creates one `UnboundedSender` per accepted socket and
//! registers it here; use cases address deliveries by user id. Creation of
//! sockets and delivery of events stay separated: the UI layer owns the
//! connection lifecycle, this type owns the sender map.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPusher, PushError, PusherChannel, UserId};

struct Registration {
    connection_id: ConnectionId,
    sender: PusherChannel,
}

/// Event pusher over per-connection WebSocket sender channels.
#[derive(Default)]
pub struct WebSocketEventPusher {
    /// user_id -> active connection's sender
    clients: Mutex<HashMap<UserId, Registration>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register(&self, user_id: UserId, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        let replaced = clients
            .insert(
                user_id.clone(),
                Registration {
                    connection_id,
                    sender,
                },
            )
            .is_some();
        if replaced {
            tracing::debug!("Replaced sender for reconnected user '{}'", user_id);
        } else {
            tracing::debug!("Registered sender for user '{}'", user_id);
        }
    }

    async fn unregister(&self, user_id: &UserId, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        // Only detach if the sender still belongs to this connection; a
        // reconnect has already replaced it otherwise.
        if clients
            .get(user_id)
            .is_some_and(|r| r.connection_id == *connection_id)
        {
            clients.remove(user_id);
            tracing::debug!("Unregistered sender for user '{}'", user_id);
        }
    }

    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), PushError> {
        let clients = self.clients.lock().await;
        if let Some(registration) = clients.get(user_id) {
            registration
                .sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            Ok(())
        } else {
            Err(PushError::ClientNotFound(user_id.as_str().to_string()))
        }
    }

    async fn broadcast(&self, targets: Vec<UserId>, content: &str) {
        let clients = self.clients.lock().await;
        for target in targets {
            if let Some(registration) = clients.get(&target) {
                if let Err(e) = registration.sender.send(content.to_string()) {
                    tracing::warn!("Failed to push event to user '{}': {}", target, e);
                }
            } else {
                tracing::warn!("User '{}' not connected during broadcast, skipping", target);
            }
        }
    }

    async fn is_connected(&self, user_id: &UserId) -> bool {
        let clients = self.clients.lock().await;
        clients.contains_key(user_id)
    }
}
