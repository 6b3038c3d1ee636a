//! Success envelope

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of every successful response
///
/// ```json
/// { "status": true, "message": "ok", "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_message("ok", data)
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
