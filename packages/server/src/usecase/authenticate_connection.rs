//! UseCase: connection authentication.
//!
//! Runs once per connection, before the socket is admitted to the event
//! pipeline. Nothing is re-verified per event; a credential revoked
//! mid-session is not retroactively enforced.

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdentity, TokenVerifier, UserStore};

use super::error::AuthenticateError;

/// Resolves a bearer credential to a live connection identity.
pub struct AuthenticateConnectionUseCase {
    verifier: Arc<dyn TokenVerifier>,
    users: Arc<dyn UserStore>,
}

impl AuthenticateConnectionUseCase {
    pub fn new(verifier: Arc<dyn TokenVerifier>, users: Arc<dyn UserStore>) -> Self {
        Self { verifier, users }
    }

    /// Verify the token, resolve the account, and bind a fresh connection
    /// id. Rejects unknown and deactivated accounts.
    pub async fn execute(&self, token: &str) -> Result<ConnectionIdentity, AuthenticateError> {
        let user_id = self
            .verifier
            .verify(token)
            .map_err(|_| AuthenticateError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|_| AuthenticateError::UserNotFound)?
            .ok_or(AuthenticateError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthenticateError::Deactivated);
        }

        Ok(ConnectionIdentity {
            user_id: user.id,
            display_name: user.name,
            role: user.role,
            connection_id: ConnectionId::generate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MockTokenVerifier, MockUserStore, Role, StorageError, TokenError, UserId, UserRecord,
    };

    fn active_user(id: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: id.to_string(),
            role: Role::Attendee,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_valid_token_yields_identity() {
        // given:
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("alice")));
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(active_user("alice"))));
        let usecase = AuthenticateConnectionUseCase::new(Arc::new(verifier), Arc::new(users));

        // when:
        let identity = usecase.execute("token").await.unwrap();

        // then:
        assert_eq!(identity.user_id, UserId::new("alice"));
        assert_eq!(identity.display_name, "alice");
    }

    #[tokio::test]
    async fn test_bad_token_is_rejected() {
        // given:
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().returning(|_| Err(TokenError::Invalid));
        let users = MockUserStore::new();
        let usecase = AuthenticateConnectionUseCase::new(Arc::new(verifier), Arc::new(users));

        // when / then:
        assert_eq!(
            usecase.execute("bad").await.unwrap_err(),
            AuthenticateError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected() {
        // given: the token verifies but the account does not resolve
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("ghost")));
        let mut users = MockUserStore::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let usecase = AuthenticateConnectionUseCase::new(Arc::new(verifier), Arc::new(users));

        // when / then:
        assert_eq!(
            usecase.execute("token").await.unwrap_err(),
            AuthenticateError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_deactivated_account_is_rejected() {
        // given:
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("alice")));
        let mut users = MockUserStore::new();
        users.expect_find_by_id().returning(|_| {
            Ok(Some(UserRecord {
                is_active: false,
                ..active_user("alice")
            }))
        });
        let usecase = AuthenticateConnectionUseCase::new(Arc::new(verifier), Arc::new(users));

        // when / then:
        assert_eq!(
            usecase.execute("token").await.unwrap_err(),
            AuthenticateError::Deactivated
        );
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_user_not_found() {
        // given:
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(UserId::new("alice")));
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(StorageError::Unavailable("down".to_string())));
        let usecase = AuthenticateConnectionUseCase::new(Arc::new(verifier), Arc::new(users));

        // when / then:
        assert_eq!(
            usecase.execute("token").await.unwrap_err(),
            AuthenticateError::UserNotFound
        );
    }
}
