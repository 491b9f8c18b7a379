//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::websocket::OnlineUserDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Snapshot of currently connected users.
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<Vec<OnlineUserDto>> {
    let users = state
        .presence
        .list_online()
        .await
        .iter()
        .map(OnlineUserDto::from_online)
        .collect();
    Json(users)
}
