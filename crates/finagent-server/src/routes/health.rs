use crate::response::ApiResponse;
use crate::state::AppState;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub version: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> ApiResponse<HealthData> {
    ApiResponse::ok(HealthData {
        version: state.app.version.clone(),
    })
}
