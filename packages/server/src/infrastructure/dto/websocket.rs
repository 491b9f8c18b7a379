//! WebSocket event envelopes.
//!
//! All frames are JSON text with an internally tagged `type` field in
//! kebab-case (`join-session-chat`, `new-message`, ...) and camelCase
//! payload fields. The chat message kind travels as `kind` because the
//! envelope tag owns `type`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{MessageKind, OnlineUser, Role, SessionMessage, VideoParticipant, VoteDirection};

/// Events a client may emit.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinSessionChat {
        session_id: String,
    },
    LeaveSessionChat {
        session_id: String,
    },
    JoinQaRoom {
        session_id: String,
    },
    LeaveQaRoom {
        session_id: String,
    },
    JoinVideoRoom {
        session_id: String,
    },
    LeaveVideoRoom {
        session_id: String,
    },
    SendMessage {
        session_id: String,
        message: String,
        #[serde(default)]
        kind: Option<MessageKind>,
        #[serde(default)]
        file_url: Option<String>,
        #[serde(default)]
        file_name: Option<String>,
        #[serde(default)]
        file_type: Option<String>,
    },
    TypingStart {
        session_id: String,
        #[serde(default)]
        user_name: Option<String>,
    },
    TypingStop {
        session_id: String,
    },
    AddReaction {
        message_id: String,
        reaction: String,
        session_id: String,
    },
    SubmitQuestion {
        session_id: String,
        question: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        is_anonymous: bool,
    },
    VoteQuestion {
        question_id: String,
        vote_type: VoteDirection,
        session_id: String,
    },
    AnswerQuestion {
        question_id: String,
        answer: String,
        session_id: String,
    },
    JoinVideoCall {
        session_id: String,
        #[serde(default)]
        user_data: serde_json::Value,
    },
    LeaveVideoCall {
        session_id: String,
    },
    Offer {
        session_id: String,
        to: String,
        payload: serde_json::Value,
    },
    Answer {
        session_id: String,
        to: String,
        payload: serde_json::Value,
    },
    IceCandidate {
        session_id: String,
        to: String,
        payload: serde_json::Value,
    },
    SendPrivateMessage {
        recipient_id: String,
        message: String,
    },
}

/// Identity snapshot attached to authored content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// A chat message as broadcast to the session's chat room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub session_id: String,
    pub user: Option<AuthorDto>,
    pub message: String,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub timestamp: i64,
    pub reactions: HashMap<String, u32>,
}

/// A question as broadcast to the session's Q&A room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub session_id: String,
    pub question: String,
    pub category: Option<String>,
    pub is_anonymous: bool,
    pub user: Option<AuthorDto>,
    pub timestamp: i64,
    pub upvotes: u32,
    pub downvotes: u32,
    pub net_votes: i64,
    pub is_answered: bool,
}

/// Who answered a question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredByDto {
    pub id: String,
    pub name: String,
}

/// A presence entry as shown in the `users-online` snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUserDto {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub status: String,
}

/// A video room member as published in roster snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParticipantDto {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

/// Events the server emits.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    NewMessage(MessageDto),
    MessageReaction {
        message_id: String,
        reactions: HashMap<String, u32>,
    },
    UserTyping {
        user_id: String,
        user_name: String,
    },
    UserStoppedTyping {
        user_id: String,
    },
    NewQuestion(QuestionDto),
    QuestionUpdated {
        id: String,
        upvotes: u32,
        downvotes: u32,
        net_votes: i64,
    },
    QuestionAnswered {
        id: String,
        answer: String,
        answered_at: i64,
        answered_by: AnsweredByDto,
    },
    ParticipantsUpdated {
        session_id: String,
        participants: Vec<VideoParticipantDto>,
    },
    UserConnected {
        id: String,
        name: String,
        role: Role,
    },
    UserDisconnected {
        user_id: String,
    },
    UsersOnline {
        users: Vec<OnlineUserDto>,
    },
    UserJoinedVideo {
        user_id: String,
        user_data: serde_json::Value,
        initiator: bool,
    },
    UserLeftVideo {
        user_id: String,
    },
    Offer {
        from: String,
        payload: serde_json::Value,
    },
    Answer {
        from: String,
        payload: serde_json::Value,
    },
    IceCandidate {
        from: String,
        payload: serde_json::Value,
    },
    ReceivePrivateMessage {
        from: AuthorDto,
        message: String,
        timestamp: i64,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Serialize for the wire. These enums contain only string-keyed maps
    /// and JSON values, so serialization cannot fail.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("server event serialization")
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}

impl MessageDto {
    pub fn from_message(message: &SessionMessage) -> Self {
        let file = message.file.as_ref();
        Self {
            id: message.id.as_str().to_string(),
            session_id: message.session_id.as_str().to_string(),
            user: message.author.as_ref().map(AuthorDto::from_author),
            message: message.body.clone(),
            kind: message.kind,
            file_url: file.map(|f| f.file_url.clone()),
            file_name: file.and_then(|f| f.file_name.clone()),
            file_type: file.and_then(|f| f.file_type.clone()),
            timestamp: message.created_at,
            reactions: message.reactions.clone(),
        }
    }
}

impl QuestionDto {
    pub fn from_question(question: &SessionMessage) -> Self {
        let counts = question.vote_counts();
        Self {
            id: question.id.as_str().to_string(),
            session_id: question.session_id.as_str().to_string(),
            question: question.body.clone(),
            category: question.category.clone(),
            is_anonymous: question.author.is_none(),
            user: question.author.as_ref().map(AuthorDto::from_author),
            timestamp: question.created_at,
            upvotes: counts.upvotes,
            downvotes: counts.downvotes,
            net_votes: counts.net(),
            is_answered: question.answer.is_some(),
        }
    }
}

impl AuthorDto {
    pub fn from_author(author: &crate::domain::MessageAuthor) -> Self {
        Self {
            id: author.id.as_str().to_string(),
            name: author.name.clone(),
            role: author.role,
        }
    }
}

impl OnlineUserDto {
    pub fn from_online(user: &OnlineUser) -> Self {
        Self {
            id: user.user_id.as_str().to_string(),
            name: user.display_name.clone(),
            role: user.role,
            status: "online".to_string(),
        }
    }
}

impl VideoParticipantDto {
    pub fn from_participant(participant: &VideoParticipant) -> Self {
        Self {
            user_id: participant.user_id.as_str().to_string(),
            name: participant.display_name.clone(),
            role: participant.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_tag_is_kebab_case() {
        // given:
        let frame = r#"{"type":"join-session-chat","sessionId":"sess1"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then:
        assert!(matches!(
            event,
            ClientEvent::JoinSessionChat { session_id } if session_id == "sess1"
        ));
    }

    #[test]
    fn test_send_message_optional_fields_default() {
        // given: a minimal send-message frame
        let frame = r#"{"type":"send-message","sessionId":"sess1","message":"hi"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then:
        match event {
            ClientEvent::SendMessage {
                kind, file_url, ..
            } => {
                assert!(kind.is_none());
                assert!(file_url.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_vote_question_directions_parse() {
        let frame =
            r#"{"type":"vote-question","questionId":"q1","voteType":"down","sessionId":"s1"}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        assert!(matches!(
            event,
            ClientEvent::VoteQuestion {
                vote_type: VoteDirection::Down,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        let frame = r#"{"type":"self-destruct","sessionId":"sess1"}"#;
        assert!(serde_json::from_str::<ClientEvent>(frame).is_err());
    }

    #[test]
    fn test_server_event_serializes_with_kebab_tag_and_camel_fields() {
        // given:
        let event = ServerEvent::UserStoppedTyping {
            user_id: "alice".to_string(),
        };

        // when:
        let json = event.to_json();

        // then:
        assert!(json.contains(r#""type":"user-stopped-typing""#));
        assert!(json.contains(r#""userId":"alice""#));
    }

    #[test]
    fn test_question_answered_shape() {
        let event = ServerEvent::QuestionAnswered {
            id: "q1".to_string(),
            answer: "yes".to_string(),
            answered_at: 1234,
            answered_by: AnsweredByDto {
                id: "spk".to_string(),
                name: "Speaker".to_string(),
            },
        };
        let json = event.to_json();
        assert!(json.contains(r#""type":"question-answered""#));
        assert!(json.contains(r#""answeredBy":{"id":"spk","name":"Speaker"}"#));
    }
}
