//! HTTP API for the finance query agent
//!
//! Route groups (`health`, `auth`, `chat`) are merged by
//! [`routes::api_router`] and nested under the configured prefix by
//! [`build_app`].

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use response::ApiResponse;
pub use state::AppState;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Application router with the API nested under its prefix and CORS applied
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let prefix = normalize_prefix(&state.config.api_prefix);

    let router = match prefix {
        Some(prefix) => Router::new().nest(&prefix, routes::api_router()),
        None => routes::api_router(),
    };

    router
        .fallback(routes::not_found)
        .with_state(state)
        .layer(cors)
}

/// `None` when routes should be mounted at the root
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}
