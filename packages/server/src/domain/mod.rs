//! Domain layer: value objects, entities and the trait seams the hub is
//! built against.
//!
//! The traits defined here are implemented by the infrastructure layer
//! (dependency inversion): the use-case layer depends on these interfaces,
//! never on concrete storage, registries or transport.

mod error;
mod identity;
mod message;
mod pusher;
mod registry;
mod repository;
mod session;
mod token;

pub use error::{DomainError, PushError, StorageError};
pub use identity::{
    ConnectionId, ConnectionIdentity, MessageId, OnlineStatus, OnlineUser, Role, SessionId, UserId,
};
pub use message::{
    FileAttachment, MessageAuthor, MessageBody, MessageKind, QuestionAnswer, SessionMessage, Vote,
    VoteCounts, VoteDirection,
};
pub use pusher::{EventPusher, PusherChannel};
pub use registry::{PresenceRegistry, RoomRegistry, TopicChannel, VideoParticipant};
pub use repository::{MessageStore, SessionStore, UserStore};
pub use session::{SessionRecord, UserRecord};
pub use token::{TokenError, TokenVerifier};

#[cfg(test)]
pub use repository::{MockMessageStore, MockSessionStore, MockUserStore};
#[cfg(test)]
pub use token::MockTokenVerifier;
