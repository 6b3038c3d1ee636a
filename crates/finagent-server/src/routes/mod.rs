//! Route groups

pub mod auth;
pub mod chat;
pub mod health;

use crate::error::ApiError;
use crate::state::AppState;
use axum::Router;

/// Every route group merged into one router
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(chat::router())
}

/// Fallback for unmatched paths
pub async fn not_found() -> ApiError {
    ApiError::not_found("no route for this path")
}
