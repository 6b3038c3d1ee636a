//! Bearer-token check

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::get;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub authenticated: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/validate", get(validate))
}

async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiResponse<AuthData>, ApiError> {
    authorize(&state, &headers)?;
    Ok(ApiResponse::ok(AuthData {
        authenticated: true,
    }))
}

/// Accept the request when no token is configured or the bearer token matches
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.config.api_token.as_deref() else {
        return Ok(());
    };

    match bearer_token(headers) {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => Ok(()),
        Some(_) => {
            debug!("Rejected request with wrong bearer token");
            Err(ApiError::unauthorized("invalid bearer token"))
        }
        None => Err(ApiError::unauthorized("missing bearer token")),
    }
}

/// Byte comparison whose running time does not depend on where the inputs differ
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}
