//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionIdentity, FileAttachment, MessageId, SessionId, TopicChannel, UserId,
    },
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::SignalKind,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Authenticate the connection token, then upgrade.
///
/// Authentication happens before `on_upgrade` so a missing or bad token is
/// rejected with a plain 401 and never consumes a socket.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(token) = query.token else {
        tracing::warn!("Rejecting websocket upgrade: no token supplied");
        return Err(StatusCode::UNAUTHORIZED);
    };
    let identity = match state.authenticate_usecase.execute(&token).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!("Rejecting websocket upgrade: {}", err);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    tracing::info!(
        "User '{}' authenticated (connection {})",
        identity.user_id,
        identity.connection_id
    );
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that drains the pusher channel into the WebSocket sink.
///
/// Everything the hub delivers to this user, broadcasts and unicasts
/// alike, arrives through the channel registered at connect time.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: ConnectionIdentity) {
    let (sender, mut receiver) = socket.split();

    // Register the pusher channel first; the connect use case also pushes
    // the users-online snapshot through it.
    let (tx, rx) = mpsc::unbounded_channel();
    state.connect_usecase.execute(&identity, tx.clone()).await;

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_identity = identity.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error for '{}': {}", recv_identity.user_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Unparseable frame from '{}': {}",
                                recv_identity.user_id,
                                e
                            );
                            let _ = tx.send(ServerEvent::error("unrecognized event").to_json());
                            continue;
                        }
                    };

                    // A failed operation answers the offending client only;
                    // the connection stays open.
                    if let Err(reply) = dispatch(&recv_state, &recv_identity, event).await {
                        let _ = tx.send(reply.to_json());
                    }
                }
                Message::Ping(_) => {
                    // Pong is handled by the protocol layer
                }
                Message::Close(_) => {
                    tracing::info!("User '{}' requested close", recv_identity.user_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Covers both clean closes and abrupt drops; the use case reconciles
    // presence and room rosters in one pass.
    state
        .disconnect_usecase
        .execute(&identity.user_id, &identity.connection_id)
        .await;
    tracing::info!(
        "User '{}' disconnected (connection {})",
        identity.user_id,
        identity.connection_id
    );
}

/// Route one client event to its use case. `Err` carries the error event
/// to answer the sender with.
async fn dispatch(
    state: &AppState,
    identity: &ConnectionIdentity,
    event: ClientEvent,
) -> Result<(), ServerEvent> {
    match event {
        ClientEvent::JoinSessionChat { session_id } => {
            state
                .topic_room_usecase
                .join(identity, TopicChannel::Chat, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::LeaveSessionChat { session_id } => {
            state
                .topic_room_usecase
                .leave(identity, TopicChannel::Chat, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::JoinQaRoom { session_id } => {
            state
                .topic_room_usecase
                .join(identity, TopicChannel::Qa, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::LeaveQaRoom { session_id } => {
            state
                .topic_room_usecase
                .leave(identity, TopicChannel::Qa, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::JoinVideoRoom { session_id } => {
            state
                .video_room_usecase
                .join(identity, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::LeaveVideoRoom { session_id } => {
            state
                .video_room_usecase
                .leave(identity, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::SendMessage {
            session_id,
            message,
            kind,
            file_url,
            file_name,
            file_type,
        } => {
            let file = file_url.map(|file_url| FileAttachment {
                file_url,
                file_name,
                file_type,
            });
            state
                .send_message_usecase
                .execute(identity, SessionId::new(session_id), message, kind, file)
                .await
                .map_err(|e| ServerEvent::error(e.to_string()))
        }
        ClientEvent::TypingStart {
            session_id,
            user_name,
        } => state
            .typing_usecase
            .started(
                identity,
                SessionId::new(session_id),
                user_name.unwrap_or_else(|| identity.display_name.clone()),
            )
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::TypingStop { session_id } => state
            .typing_usecase
            .stopped(identity, SessionId::new(session_id))
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::AddReaction {
            message_id,
            reaction,
            session_id: _,
        } => state
            .add_reaction_usecase
            .execute(identity, MessageId::new(message_id), reaction)
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::SubmitQuestion {
            session_id,
            question,
            category,
            is_anonymous,
        } => state
            .submit_question_usecase
            .execute(
                identity,
                SessionId::new(session_id),
                question,
                category,
                is_anonymous,
            )
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::VoteQuestion {
            question_id,
            vote_type,
            session_id: _,
        } => state
            .vote_question_usecase
            .execute(identity, MessageId::new(question_id), vote_type)
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::AnswerQuestion {
            question_id,
            answer,
            session_id: _,
        } => state
            .answer_question_usecase
            .execute(identity, MessageId::new(question_id), answer)
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::JoinVideoCall {
            session_id,
            user_data,
        } => {
            state
                .video_room_usecase
                .announce_call_join(identity, &SessionId::new(session_id), user_data)
                .await;
            Ok(())
        }
        ClientEvent::LeaveVideoCall { session_id } => {
            state
                .video_room_usecase
                .announce_call_leave(identity, &SessionId::new(session_id))
                .await;
            Ok(())
        }
        ClientEvent::Offer {
            session_id,
            to,
            payload,
        } => state
            .signal_relay_usecase
            .execute(
                identity,
                SignalKind::Offer,
                SessionId::new(session_id),
                UserId::new(to),
                payload,
            )
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::Answer {
            session_id,
            to,
            payload,
        } => state
            .signal_relay_usecase
            .execute(
                identity,
                SignalKind::Answer,
                SessionId::new(session_id),
                UserId::new(to),
                payload,
            )
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::IceCandidate {
            session_id,
            to,
            payload,
        } => state
            .signal_relay_usecase
            .execute(
                identity,
                SignalKind::IceCandidate,
                SessionId::new(session_id),
                UserId::new(to),
                payload,
            )
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
        ClientEvent::SendPrivateMessage {
            recipient_id,
            message,
        } => state
            .private_message_usecase
            .execute(identity, UserId::new(recipient_id), message)
            .await
            .map_err(|e| ServerEvent::error(e.to_string())),
    }
}
