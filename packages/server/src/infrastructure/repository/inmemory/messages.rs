//! In-memory message store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageId, MessageStore, SessionMessage, StorageError};

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<HashMap<MessageId, SessionMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: SessionMessage) -> Result<(), StorageError> {
        let mut messages = self.messages.lock().await;
        messages.insert(message.id.clone(), message);
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<SessionMessage>, StorageError> {
        let messages = self.messages.lock().await;
        Ok(messages.get(id).cloned())
    }

    async fn update(&self, message: SessionMessage) -> Result<(), StorageError> {
        let mut messages = self.messages.lock().await;
        if !messages.contains_key(&message.id) {
            return Err(StorageError::Unavailable(format!(
                "message '{}' does not exist",
                message.id
            )));
        }
        messages.insert(message.id.clone(), message);
        Ok(())
    }
}
