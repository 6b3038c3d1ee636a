//! Error types for market data and query handling

use thiserror::Error;

/// Finance agent errors
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// NSE India error
    #[error("NSE error: {0}")]
    NseError(String),

    /// Upstream answered but had nothing for the symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        /// Symbol that was looked up
        symbol: String,
        /// Upstream explanation
        reason: String,
    },

    /// Language model call failed
    #[error("LLM error: {0}")]
    Llm(#[from] finagent_llm::LLMError),

    /// Tool registration failed
    #[error("Tool error: {0}")]
    Tool(#[from] finagent_tools::ToolError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for finance operations
pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<FinanceError> for finagent_tools::ToolError {
    fn from(err: FinanceError) -> Self {
        finagent_tools::ToolError::ExecutionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::DataUnavailable {
            symbol: "TCS.NS".to_string(),
            reason: "empty result".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for TCS.NS: empty result");
    }

    #[test]
    fn test_into_tool_error() {
        let err: finagent_tools::ToolError = FinanceError::NseError("blocked".to_string()).into();
        assert_eq!(err.to_string(), "NSE error: blocked");
    }
}
