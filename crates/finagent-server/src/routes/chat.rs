//! Chat route: one query in, one answer out

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::routes::auth::authorize;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub session_id: String,
    pub reply: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ApiResponse<ChatReply>, ApiError> {
    authorize(&state, &headers)?;

    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let message = request.user_message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("user_message must not be empty"));
    }

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!(session_id = %session_id, message_length = message.len(), "Chat request");

    let reply = state.handler.handle_query(message).await?;

    Ok(ApiResponse::ok(ChatReply { session_id, reply }))
}
