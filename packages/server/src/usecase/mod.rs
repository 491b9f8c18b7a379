//! Use-case layer: one struct per client-visible operation.
//!
//! Each use case receives its collaborators as `Arc<dyn Trait>` and owns the
//! full handling of one event: authorization, state change, fan-out. The
//! WebSocket handler stays a thin dispatcher.

mod add_reaction;
mod answer_question;
mod authenticate_connection;
mod connect_user;
mod disconnect_user;
mod error;
mod private_message;
mod send_message;
mod signal_relay;
mod submit_question;
mod topic_rooms;
mod typing;
mod video_rooms;
mod vote_question;

#[cfg(test)]
pub mod testing;

pub use add_reaction::AddReactionUseCase;
pub use answer_question::AnswerQuestionUseCase;
pub use authenticate_connection::AuthenticateConnectionUseCase;
pub use connect_user::ConnectUserUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{AuthenticateError, ContentError, RelayError};
pub use private_message::PrivateMessageUseCase;
pub use send_message::SendMessageUseCase;
pub use signal_relay::{SignalKind, SignalRelayUseCase};
pub use submit_question::SubmitQuestionUseCase;
pub use topic_rooms::TopicRoomUseCase;
pub use typing::TypingUseCase;
pub use video_rooms::VideoRoomUseCase;
pub use vote_question::VoteQuestionUseCase;
