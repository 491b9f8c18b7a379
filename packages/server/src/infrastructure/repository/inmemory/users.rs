//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StorageError, UserId, UserRecord, UserStore};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, user: UserRecord) {
        let mut users = self.users.lock().await;
        users.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.lock().await;
        Ok(users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn test_find_by_id_returns_inserted_user() {
        // given:
        let store = InMemoryUserStore::new();
        store
            .insert(UserRecord {
                id: UserId::new("alice"),
                name: "Alice".to_string(),
                role: Role::Attendee,
                is_active: true,
            })
            .await;

        // when:
        let found = store.find_by_id(&UserId::new("alice")).await.unwrap();

        // then:
        assert_eq!(found.map(|u| u.name), Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_unknown_user() {
        let store = InMemoryUserStore::new();
        let found = store.find_by_id(&UserId::new("ghost")).await.unwrap();
        assert!(found.is_none());
    }
}
