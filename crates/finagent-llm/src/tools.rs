//! Tool definition types for LLM tool use

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool descriptor sent to the LLM
///
/// Name, description and JSON schema of a tool the model may call. The name
/// is the dispatch key when the model answers with a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in the registry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use finagent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({ "symbol": schema::string("Ticker symbol") }),
    ///     &["symbol"],
    /// );
    /// assert_eq!(schema["additionalProperties"], false);
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = schema::object(
            json!({ "expression": schema::string("Arithmetic expression") }),
            &["expression"],
        );

        let tool = ToolDefinition::new("calculator", "Evaluate arithmetic", schema.clone());
        assert_eq!(tool.name, "calculator");
        assert_eq!(tool.input_schema, schema);
        assert_eq!(tool.input_schema["required"][0], "expression");
    }

    #[test]
    fn test_array_schema() {
        let fields = schema::array("Fields", schema::string("Field label"));
        assert_eq!(fields["type"], "array");
        assert_eq!(fields["items"]["type"], "string");
    }
}
