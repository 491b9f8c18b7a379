//! Real-time session coordination hub.
//!
//! Authenticates WebSocket connections with a JWT, tracks presence, manages
//! chat/Q&A/video room membership and relays WebRTC signaling.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rostrum-server
//! cargo run --bin rostrum-server -- --host 0.0.0.0 --port 3000 --seed-demo
//! ```

use std::sync::Arc;

use clap::Parser;

use rostrum_server::{
    domain::{Role, SessionId, SessionRecord, UserId, UserRecord},
    infrastructure::{
        auth::JwtVerifier,
        message_pusher::WebSocketEventPusher,
        registry::{InMemoryPresenceRegistry, InMemoryRoomRegistry},
        repository::{InMemoryMessageStore, InMemorySessionStore, InMemoryUserStore},
    },
    ui::{AppState, Server},
    usecase::{
        AddReactionUseCase, AnswerQuestionUseCase, AuthenticateConnectionUseCase,
        ConnectUserUseCase, DisconnectUserUseCase, PrivateMessageUseCase, SendMessageUseCase,
        SignalRelayUseCase, SubmitQuestionUseCase, TopicRoomUseCase, TypingUseCase,
        VideoRoomUseCase, VoteQuestionUseCase,
    },
};
use rostrum_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock, timestamp_to_rfc3339},
};

#[derive(Parser, Debug)]
#[command(name = "rostrum-server")]
#[command(about = "Real-time session coordination hub", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seed demo users and a demo session, and log their dev tokens
    #[arg(long, default_value_t = false)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_CRATE_NAME"), "rostrum_shared"], "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Stores
    // 2. EventPusher and registries
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Stores (in-memory)
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let messages = Arc::new(InMemoryMessageStore::new());

    // 2. EventPusher, registries, token verifier, clock
    let pusher = Arc::new(WebSocketEventPusher::new());
    let presence = Arc::new(InMemoryPresenceRegistry::new());
    let rooms = Arc::new(InMemoryRoomRegistry::new());
    let verifier = Arc::new(JwtVerifier::from_env());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if args.seed_demo {
        seed_demo(&users, &sessions, &verifier).await;
    }

    // 3. UseCases
    let state = AppState {
        authenticate_usecase: Arc::new(AuthenticateConnectionUseCase::new(
            verifier.clone(),
            users.clone(),
        )),
        connect_usecase: Arc::new(ConnectUserUseCase::new(presence.clone(), pusher.clone())),
        disconnect_usecase: Arc::new(DisconnectUserUseCase::new(
            presence.clone(),
            rooms.clone(),
            pusher.clone(),
        )),
        topic_room_usecase: Arc::new(TopicRoomUseCase::new(rooms.clone())),
        video_room_usecase: Arc::new(VideoRoomUseCase::new(rooms.clone(), pusher.clone())),
        send_message_usecase: Arc::new(SendMessageUseCase::new(
            sessions.clone(),
            messages.clone(),
            rooms.clone(),
            pusher.clone(),
            clock.clone(),
        )),
        typing_usecase: Arc::new(TypingUseCase::new(
            sessions.clone(),
            rooms.clone(),
            pusher.clone(),
        )),
        add_reaction_usecase: Arc::new(AddReactionUseCase::new(
            sessions.clone(),
            messages.clone(),
            rooms.clone(),
            pusher.clone(),
        )),
        submit_question_usecase: Arc::new(SubmitQuestionUseCase::new(
            sessions.clone(),
            messages.clone(),
            rooms.clone(),
            pusher.clone(),
            clock.clone(),
        )),
        vote_question_usecase: Arc::new(VoteQuestionUseCase::new(
            sessions.clone(),
            messages.clone(),
            rooms.clone(),
            pusher.clone(),
        )),
        answer_question_usecase: Arc::new(AnswerQuestionUseCase::new(
            sessions.clone(),
            messages.clone(),
            rooms.clone(),
            pusher.clone(),
            clock.clone(),
        )),
        signal_relay_usecase: Arc::new(SignalRelayUseCase::new(rooms.clone(), pusher.clone())),
        private_message_usecase: Arc::new(PrivateMessageUseCase::new(pusher.clone(), clock)),
        presence,
    };

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Seed a demo session with three users and log a dev token for each, so a
/// local client can connect without a separate identity service.
async fn seed_demo(
    users: &InMemoryUserStore,
    sessions: &InMemorySessionStore,
    verifier: &JwtVerifier,
) {
    let ttl = chrono::Duration::hours(24);
    let valid_until = timestamp_to_rfc3339((chrono::Utc::now() + ttl).timestamp_millis());
    let demo_users = [
        ("alice", "Alice", Role::Attendee),
        ("sam", "Sam", Role::Speaker),
        ("ada", "Ada", Role::Admin),
    ];
    for (id, name, role) in demo_users {
        users
            .insert(UserRecord {
                id: UserId::new(id),
                name: name.to_string(),
                role,
                is_active: true,
            })
            .await;
        match verifier.issue(&UserId::new(id), ttl) {
            Ok(token) => {
                tracing::info!("Demo token for '{}' (valid until {}): {}", id, valid_until, token)
            }
            Err(e) => tracing::warn!("Failed to issue demo token for '{}': {}", id, e),
        }
    }
    sessions
        .insert(SessionRecord {
            id: SessionId::new("demo-session"),
            title: "Demo Session".to_string(),
            speaker: UserId::new("sam"),
            attendees: vec![UserId::new("alice")],
            is_active: true,
        })
        .await;
    tracing::info!("Seeded demo session 'demo-session'");
}
