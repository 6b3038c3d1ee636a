//! Query handler: one model turn, then sequential tool dispatch
//!
//! A query moves through three states:
//! 1. awaiting the model, with the system prompt and every tool descriptor attached
//! 2. dispatching the proposed tool calls in the order the model gave them
//! 3. done, returning either the model's own text or the collected tool output

use crate::config::{DEFAULT_MODEL, FinanceConfig};
use crate::error::{FinanceError, Result};
use crate::market::MarketData;
use crate::prompts::SYSTEM_PROMPT;
use crate::tools::default_registry;
use finagent_llm::{CompletionRequest, LLMProvider, Message, ToolCall};
use finagent_tools::ToolRegistry;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Model parameters for each query
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: f32,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: finagent_llm::completion::DEFAULT_MAX_TOKENS,
            temperature: 0.2,
        }
    }
}

impl From<&FinanceConfig> for HandlerConfig {
    fn from(config: &FinanceConfig) -> Self {
        Self {
            model: config.model.clone(),
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Session object binding a provider to a tool registry
///
/// Built once and shared behind an `Arc`; every query keeps its own
/// accumulator, so concurrent queries share nothing mutable.
pub struct QueryHandler {
    provider: Arc<dyn LLMProvider>,
    registry: Arc<ToolRegistry>,
    config: HandlerConfig,
}

impl QueryHandler {
    /// Create a builder
    pub fn builder() -> QueryHandlerBuilder {
        QueryHandlerBuilder::default()
    }

    /// Handler over the default tools backed by live market data
    pub fn from_config(provider: Arc<dyn LLMProvider>, config: &FinanceConfig) -> Result<Self> {
        let market = Arc::new(MarketData::from_config(config)?);

        Self::builder()
            .provider(provider)
            .registry(default_registry(market)?)
            .config(HandlerConfig::from(config))
            .build()
    }

    /// Registered tools
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Model parameters
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Answer a query
    ///
    /// Returns the model's text unchanged when it proposes no tool calls.
    /// Otherwise each call's output is appended on its own line, unknown
    /// tools and tool failures included, and trailing whitespace is trimmed.
    /// Only a failed model call is an error.
    #[instrument(skip(self), fields(model = %self.config.model))]
    pub async fn handle_query(&self, query: &str) -> Result<String> {
        let request = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(query))
            .system(&self.config.system_prompt)
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .tools(self.registry.definitions())
            .build();

        info!(
            provider = self.provider.name(),
            tool_count = request.tools.len(),
            "Sending query to model"
        );

        let response = self.provider.complete(request).await.map_err(|e| {
            warn!(error = %e, "Model call failed");
            FinanceError::Llm(e)
        })?;

        let calls = response.message.tool_calls();
        if calls.is_empty() {
            let text = response.message.text().unwrap_or_default().to_string();
            info!(response_length = text.len(), "Model answered without tools");
            return Ok(text);
        }

        info!(tool_count = calls.len(), "Dispatching tool calls");

        let mut output = String::new();
        for call in calls {
            output.push_str(&self.dispatch(call).await);
            output.push('\n');
        }

        let answer = output.trim_end().to_string();
        info!(response_length = answer.len(), "Query completed");
        Ok(answer)
    }

    /// Run one tool call and return its line of output
    async fn dispatch(&self, call: &ToolCall) -> String {
        let Some(tool) = self.registry.get(&call.name) else {
            warn!(tool_name = %call.name, tool_id = %call.id, "Unknown tool requested");
            return format!("Unknown tool: {}", call.name);
        };

        let preview: String = call.arguments.chars().take(200).collect();
        debug!(tool_name = %call.name, tool_id = %call.id, arguments = %preview, "Executing tool");

        match tool.call(&call.arguments).await {
            Ok(result) => {
                info!(tool_name = %call.name, result_length = result.len(), "Tool execution succeeded");
                result
            }
            Err(e) => {
                warn!(tool_name = %call.name, error = %e, "Tool execution failed");
                format!("Error: {e}")
            }
        }
    }
}

impl fmt::Debug for QueryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHandler")
            .field("provider", &self.provider.name())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`QueryHandler`]
#[derive(Default)]
pub struct QueryHandlerBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    registry: Option<Arc<ToolRegistry>>,
    config: Option<HandlerConfig>,
}

impl QueryHandlerBuilder {
    /// Set the model provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn registry(mut self, registry: impl Into<Arc<ToolRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Set the model parameters
    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the handler; provider and registry are required
    pub fn build(self) -> Result<QueryHandler> {
        let provider = self
            .provider
            .ok_or_else(|| FinanceError::ConfigError("query handler needs a provider".to_string()))?;
        let registry = self
            .registry
            .ok_or_else(|| FinanceError::ConfigError("query handler needs a tool registry".to_string()))?;

        Ok(QueryHandler {
            provider,
            registry,
            config: self.config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CalculatorTool;
    use async_trait::async_trait;
    use finagent_llm::{CompletionResponse, LLMError};
    use finagent_tools::{Tool, ToolError};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Provider replaying a fixed response and recording requests
    struct ScriptedProvider {
        reply: Option<CompletionResponse>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn replying(reply: CompletionResponse) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> finagent_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.reply
                .clone()
                .ok_or_else(|| LLMError::Status {
                    status: 503,
                    body: "upstream unavailable".to_string(),
                })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct FixedTool(&'static str, &'static str);

    #[async_trait]
    impl Tool for FixedTool {
        async fn call(&self, _arguments: &str) -> finagent_tools::Result<String> {
            Ok(self.1.to_string())
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Returns a fixed string"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        async fn call(&self, _arguments: &str) -> finagent_tools::Result<String> {
            Err(ToolError::ExecutionFailed("quote service down".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .with_tool(Arc::new(FixedTool("get_stock_price", "The current stock price of TCS.NS is ₹3512.46")))
            .unwrap()
            .with_tool(Arc::new(FixedTool("get_financial_summary", "Market Cap: N/A\nEPS: 1\nP/E Ratio: N/A\nDividend Yield: N/A\n")))
            .unwrap()
            .with_tool(Arc::new(CalculatorTool))
            .unwrap()
            .with_tool(Arc::new(FailingTool))
            .unwrap()
    }

    fn handler(provider: Arc<ScriptedProvider>) -> QueryHandler {
        QueryHandler::builder()
            .provider(provider)
            .registry(registry())
            .build()
            .unwrap()
    }

    fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
        ToolCall::new(id, name, arguments)
    }

    #[tokio::test]
    async fn test_text_answer_returned_verbatim() {
        let provider = ScriptedProvider::replying(CompletionResponse::text("  Hello there.\n"));
        let answer = handler(provider).handle_query("hi").await.unwrap();
        assert_eq!(answer, "  Hello there.\n");
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_tools() {
        let provider = ScriptedProvider::replying(CompletionResponse::text("ok"));
        let handler = handler(Arc::clone(&provider));
        handler.handle_query("price of TCS").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.max_tokens, 400);
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.tools.len(), 4);
        assert_eq!(request.messages[0].text(), Some("price of TCS"));
    }

    #[tokio::test]
    async fn test_known_and_unknown_tools() {
        let provider = ScriptedProvider::replying(CompletionResponse::tool_calls(vec![
            call("1", "get_stock_price", r#"{"symbol":"TCS"}"#),
            call("2", "get_weather", r#"{"city":"Pune"}"#),
        ]));

        let answer = handler(provider).handle_query("TCS price and weather").await.unwrap();
        assert_eq!(
            answer,
            "The current stock price of TCS.NS is ₹3512.46\nUnknown tool: get_weather"
        );
    }

    #[tokio::test]
    async fn test_dispatch_preserves_model_order() {
        let provider = ScriptedProvider::replying(CompletionResponse::tool_calls(vec![
            call("a", "calculator", r#"{"expression":"2+2"}"#),
            call("b", "get_stock_price", r#"{"symbol":"TCS"}"#),
            call("c", "calculator", r#"{"expression":"10/4"}"#),
        ]));

        let answer = handler(provider).handle_query("q").await.unwrap();
        assert_eq!(
            answer,
            "4\nThe current stock price of TCS.NS is ₹3512.46\n2.5"
        );
    }

    #[tokio::test]
    async fn test_trailing_whitespace_trimmed() {
        let provider = ScriptedProvider::replying(CompletionResponse::tool_calls(vec![call(
            "1",
            "get_financial_summary",
            r#"{"symbol":"TCS"}"#,
        )]));

        let answer = handler(provider).handle_query("q").await.unwrap();
        assert_eq!(answer, "Market Cap: N/A\nEPS: 1\nP/E Ratio: N/A\nDividend Yield: N/A");
    }

    #[tokio::test]
    async fn test_tool_errors_are_inline() {
        let provider = ScriptedProvider::replying(CompletionResponse::tool_calls(vec![
            call("1", "broken", "{}"),
            call("2", "calculator", r#"{"expression": "2+2", "extra": 1}"#),
            call("3", "calculator", r#"{"expression":"1+1"}"#),
        ]));

        let answer = handler(provider).handle_query("q").await.unwrap();
        let lines: Vec<&str> = answer.lines().collect();
        assert_eq!(lines[0], "Error: quote service down");
        assert!(lines[1].starts_with("Error: Invalid arguments for calculator"));
        assert_eq!(lines[2], "2");
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error() {
        let err = handler(ScriptedProvider::failing())
            .handle_query("q")
            .await
            .unwrap_err();
        assert!(matches!(err, FinanceError::Llm(_)));
    }

    #[test]
    fn test_builder_requires_parts() {
        assert!(QueryHandler::builder().build().is_err());
        assert!(
            QueryHandler::builder()
                .provider(ScriptedProvider::failing())
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_handler_config_from_finance_config() {
        let finance = FinanceConfig::builder()
            .model("meta-llama/Llama-3.1-8B-Instruct")
            .system_prompt("Be terse.")
            .build()
            .unwrap();

        let config = HandlerConfig::from(&finance);
        assert_eq!(config.model, "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(config.system_prompt, "Be terse.");
        assert_eq!(config.max_tokens, 400);
    }
}
