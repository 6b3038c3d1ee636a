//! LLM provider abstraction layer for finagent
//!
//! This crate provides provider-agnostic abstractions for talking to a
//! tool-calling language model. It includes:
//!
//! - Message types, including model-proposed tool calls
//! - Completion request/response types
//! - Tool definitions sent to the model
//! - The `LLMProvider` trait and an OpenAI-compatible implementation

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role, ToolCall};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
