//! Error types for tool registration and execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised by tools and the registry
#[derive(Error, Debug)]
pub enum ToolError {
    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// The argument payload did not match the tool's parameters
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Tool name
        tool: String,
        /// Parser message
        reason: String,
    },

    /// The tool ran but could not produce a result
    #[error("{0}")]
    ExecutionFailed(String),
}
