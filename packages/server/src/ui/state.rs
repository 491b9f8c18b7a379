//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::PresenceRegistry;
use crate::usecase::{
    AddReactionUseCase, AnswerQuestionUseCase, AuthenticateConnectionUseCase, ConnectUserUseCase,
    DisconnectUserUseCase, PrivateMessageUseCase, SendMessageUseCase, SignalRelayUseCase,
    SubmitQuestionUseCase, TopicRoomUseCase, TypingUseCase, VideoRoomUseCase, VoteQuestionUseCase,
};

/// Shared application state: one use case per client-visible operation,
/// plus the presence registry for the HTTP snapshot endpoint.
pub struct AppState {
    pub authenticate_usecase: Arc<AuthenticateConnectionUseCase>,
    pub connect_usecase: Arc<ConnectUserUseCase>,
    pub disconnect_usecase: Arc<DisconnectUserUseCase>,
    pub topic_room_usecase: Arc<TopicRoomUseCase>,
    pub video_room_usecase: Arc<VideoRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub typing_usecase: Arc<TypingUseCase>,
    pub add_reaction_usecase: Arc<AddReactionUseCase>,
    pub submit_question_usecase: Arc<SubmitQuestionUseCase>,
    pub vote_question_usecase: Arc<VoteQuestionUseCase>,
    pub answer_question_usecase: Arc<AnswerQuestionUseCase>,
    pub signal_relay_usecase: Arc<SignalRelayUseCase>,
    pub private_message_usecase: Arc<PrivateMessageUseCase>,
    pub presence: Arc<dyn PresenceRegistry>,
}
