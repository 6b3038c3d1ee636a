//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors raised while calling a chat-completion endpoint
#[derive(Error, Debug)]
pub enum LLMError {
    /// Provider could not be configured
    #[error("configuration error: {0}")]
    Config(String),

    /// Request rejected before or by the endpoint
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Any other non-success HTTP status, with the response body
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be read as a chat completion
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
