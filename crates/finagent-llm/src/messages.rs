//! Message types for LLM communication
//!
//! Assistant messages may carry tool calls proposed by the model. The call
//! arguments are kept as the raw serialized text the model produced; binding
//! them to typed parameters is the tool's job, not the transport's.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// A tool invocation proposed by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id
    pub id: String,
    /// Name of the tool the model wants to run
    pub name: String,
    /// Serialized argument mapping, exactly as the model produced it
    pub arguments: String,
}

impl ToolCall {
    /// Create a tool call
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Tool call requested by the assistant
    ToolUse(ToolCall),
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message proposing tool calls
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(
                calls.into_iter().map(ContentBlock::ToolUse).collect(),
            )),
        }
    }

    /// Extract the first text content from the message
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s),
            Some(MessageContent::Blocks(blocks)) => blocks.iter().find_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
            None => None,
        }
    }

    /// Tool calls proposed in this message, in the order the model listed them
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::ToolUse(call) => Some(call),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Check if this message contains any tool calls
    pub fn has_tool_calls(&self) -> bool {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .any(|b| matches!(b, ContentBlock::ToolUse(_))),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("Hello"));
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn test_tool_calls_keep_model_order() {
        let msg = Message::assistant_tool_calls(vec![
            ToolCall::new("call_1", "get_stock_price", r#"{"symbol":"TCS"}"#),
            ToolCall::new("call_2", "calculator", r#"{"expression":"2+2"}"#),
        ]);

        let calls = msg.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "get_stock_price");
        assert_eq!(calls[1].name, "calculator");
        assert_eq!(calls[1].arguments, r#"{"expression":"2+2"}"#);
        assert!(msg.text().is_none());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
        assert!(serde_json::from_str::<Role>(r#""system""#).is_err());
    }

    #[test]
    fn test_tool_use_serialization_shape() {
        let block = ContentBlock::ToolUse(ToolCall::new("c1", "calculator", "{}"));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_use");
        assert_eq!(json["name"], "calculator");
        assert_eq!(json["arguments"], "{}");
    }
}
