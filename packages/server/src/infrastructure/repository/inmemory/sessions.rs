//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{SessionId, SessionRecord, SessionStore, StorageError};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, session: SessionRecord) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.clone(), session);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRecord>, StorageError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(id).cloned())
    }
}
