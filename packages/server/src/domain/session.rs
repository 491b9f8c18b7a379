//! Session and user records served by the storage collaborators.

use super::identity::{Role, SessionId, UserId};

/// A registered account, as resolved during connection authentication.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

/// A scheduled session with a speaker and an attendee list (external
/// entity; the hub only reads it for authorization).
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub title: String,
    pub speaker: UserId,
    pub attendees: Vec<UserId>,
    pub is_active: bool,
}

impl SessionRecord {
    /// Whether the given identity may act on this session's rooms: a
    /// registered attendee, the designated speaker, or an administrator.
    pub fn allows(&self, user_id: &UserId, role: Role) -> bool {
        role.is_admin()
            || self.speaker == *user_id
            || self.attendees.iter().any(|a| a == user_id)
    }

    /// Whether the given identity may answer questions for this session:
    /// the designated speaker or an administrator.
    pub fn allows_answering(&self, user_id: &UserId, role: Role) -> bool {
        role.is_admin() || self.speaker == *user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_fixture() -> SessionRecord {
        SessionRecord {
            id: SessionId::new("sess1"),
            title: "Intro to WebRTC".to_string(),
            speaker: UserId::new("spk"),
            attendees: vec![UserId::new("alice"), UserId::new("bob")],
            is_active: true,
        }
    }

    #[test]
    fn test_attendee_is_allowed() {
        let session = session_fixture();
        assert!(session.allows(&UserId::new("alice"), Role::Attendee));
    }

    #[test]
    fn test_speaker_is_allowed() {
        let session = session_fixture();
        assert!(session.allows(&UserId::new("spk"), Role::Speaker));
    }

    #[test]
    fn test_admin_is_allowed_without_registration() {
        let session = session_fixture();
        assert!(session.allows(&UserId::new("root"), Role::Admin));
    }

    #[test]
    fn test_unregistered_attendee_is_denied() {
        let session = session_fixture();
        assert!(!session.allows(&UserId::new("mallory"), Role::Attendee));
    }

    #[test]
    fn test_only_speaker_or_admin_may_answer() {
        let session = session_fixture();
        assert!(session.allows_answering(&UserId::new("spk"), Role::Speaker));
        assert!(session.allows_answering(&UserId::new("root"), Role::Admin));
        assert!(!session.allows_answering(&UserId::new("alice"), Role::Attendee));
    }
}
