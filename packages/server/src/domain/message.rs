//! Chat and Q&A message entity.
//!
//! Mutations (votes, reactions, answers) are pure in-memory operations on the
//! entity; the use-case layer is responsible for re-fetching, applying and
//! persisting through the [`MessageStore`](super::MessageStore) collaborator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::identity::{MessageId, Role, SessionId, UserId};

/// Maximum chat message body length.
pub const MAX_BODY_LEN: usize = 500;
/// Maximum question text length.
pub const MAX_QUESTION_LEN: usize = 1000;
/// Maximum answer text length.
pub const MAX_ANSWER_LEN: usize = 2000;

/// Validated message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    /// Validate a chat message body (non-empty, at most [`MAX_BODY_LEN`]).
    pub fn new(body: impl Into<String>) -> Result<Self, DomainError> {
        Self::bounded(body, MAX_BODY_LEN)
    }

    /// Validate a question text (non-empty, at most [`MAX_QUESTION_LEN`]).
    pub fn question(body: impl Into<String>) -> Result<Self, DomainError> {
        Self::bounded(body, MAX_QUESTION_LEN)
    }

    /// Validate an answer text (non-empty, at most [`MAX_ANSWER_LEN`]).
    pub fn answer(body: impl Into<String>) -> Result<Self, DomainError> {
        Self::bounded(body, MAX_ANSWER_LEN)
    }

    fn bounded(body: impl Into<String>, limit: usize) -> Result<Self, DomainError> {
        let body = body.into();
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if trimmed.chars().count() > limit {
            return Err(DomainError::ContentTooLong { limit });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Kind of a persisted session message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Message,
    Question,
    Announcement,
}

/// Identity snapshot of a message author.
///
/// `None` at the message level means the author chose to stay anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Optional file carried with a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

/// Direction of a question vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

/// A single recorded vote. At most one per voter per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter: UserId,
    pub direction: VoteDirection,
}

/// Vote counts recomputed from the authoritative stored vote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: u32,
    pub downvotes: u32,
}

impl VoteCounts {
    pub fn net(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// An answer attached to a question. Answering again overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub text: String,
    pub answered_by: UserId,
    pub answered_by_name: String,
    pub answered_at: i64,
}

/// A persisted chat message, question or announcement within a session.
#[derive(Debug, Clone)]
pub struct SessionMessage {
    pub id: MessageId,
    pub session_id: SessionId,
    pub author: Option<MessageAuthor>,
    pub body: String,
    pub kind: MessageKind,
    pub category: Option<String>,
    pub file: Option<FileAttachment>,
    pub created_at: i64,
    pub reactions: HashMap<String, u32>,
    pub votes: Vec<Vote>,
    pub answer: Option<QuestionAnswer>,
}

impl SessionMessage {
    /// Create a plain chat message.
    pub fn chat(
        session_id: SessionId,
        author: MessageAuthor,
        body: MessageBody,
        file: Option<FileAttachment>,
        created_at: i64,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            session_id,
            author: Some(author),
            body: body.into_string(),
            kind: MessageKind::Message,
            category: None,
            file,
            created_at,
            reactions: HashMap::new(),
            votes: Vec::new(),
            answer: None,
        }
    }

    /// Create a question. `author` is `None` for anonymous submissions.
    pub fn question(
        session_id: SessionId,
        author: Option<MessageAuthor>,
        body: MessageBody,
        category: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            session_id,
            author,
            body: body.into_string(),
            kind: MessageKind::Question,
            category: Some(category.unwrap_or_else(|| "general".to_string())),
            file: None,
            created_at,
            reactions: HashMap::new(),
            votes: Vec::new(),
            answer: None,
        }
    }

    pub fn is_question(&self) -> bool {
        self.kind == MessageKind::Question
    }

    /// Increment the count for a named reaction.
    pub fn add_reaction(&mut self, reaction: &str) {
        *self.reactions.entry(reaction.to_string()).or_insert(0) += 1;
    }

    /// Apply a vote under the one-active-vote-per-voter policy.
    ///
    /// Casting the same direction again removes the vote (toggle-off);
    /// casting the opposite direction replaces it.
    pub fn apply_vote(&mut self, voter: UserId, direction: VoteDirection) {
        match self.votes.iter().position(|v| v.voter == voter) {
            Some(index) if self.votes[index].direction == direction => {
                self.votes.remove(index);
            }
            Some(index) => {
                self.votes[index].direction = direction;
            }
            None => {
                self.votes.push(Vote { voter, direction });
            }
        }
    }

    /// Recompute vote counts from the stored vote set.
    pub fn vote_counts(&self) -> VoteCounts {
        let upvotes = self
            .votes
            .iter()
            .filter(|v| v.direction == VoteDirection::Up)
            .count() as u32;
        let downvotes = self
            .votes
            .iter()
            .filter(|v| v.direction == VoteDirection::Down)
            .count() as u32;
        VoteCounts { upvotes, downvotes }
    }

    /// The acting voter's current vote, if any.
    pub fn vote_of(&self, voter: &UserId) -> Option<VoteDirection> {
        self.votes
            .iter()
            .find(|v| v.voter == *voter)
            .map(|v| v.direction)
    }

    /// Attach or overwrite the answer to this question.
    pub fn set_answer(&mut self, answer: QuestionAnswer) {
        self.answer = Some(answer);
    }
}
