//! Tool trait definition

use crate::{Result, ToolError};
use async_trait::async_trait;
use finagent_llm::ToolDefinition;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for tools that the model can call
///
/// A tool advertises a name, a description and a JSON schema. When the
/// model proposes a call, the raw argument text is handed to [`Tool::call`],
/// which returns the text that goes into the answer.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool with the model's serialized arguments
    async fn call(&self, arguments: &str) -> Result<String>;

    /// Tool name, unique within a registry
    fn name(&self) -> &str;

    /// Description the model reads to decide when to use the tool
    fn description(&self) -> &str;

    /// JSON schema of the parameters
    fn input_schema(&self) -> Value;

    /// Descriptor sent to the model
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// Bind a serialized argument mapping to a typed parameter struct
///
/// Only JSON objects are accepted. A blank payload is read as `{}` so tools
/// whose parameters are all optional can be called without arguments.
/// Parameter structs should use `#[serde(deny_unknown_fields)]`.
pub fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: &str) -> Result<T> {
    let trimmed = arguments.trim();
    let payload = if trimmed.is_empty() { "{}" } else { trimmed };

    let value: Value = serde_json::from_str(payload).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })?;

    if !value.is_object() {
        return Err(ToolError::InvalidArguments {
            tool: tool.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
