//! End-to-end tests of the HTTP API over a real socket

use async_trait::async_trait;
use finagent_llm::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, ToolCall};
use finagent_market::{
    ExchangeSource, FinanceError, InfoMap, MarketData, MarketDataSource, QueryHandler,
    default_registry,
};
use finagent_server::{AppState, ServerConfig, build_app};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

enum Reply {
    Text(&'static str),
    Tools,
    Fail,
}

struct FakeProvider(Reply);

#[async_trait]
impl LLMProvider for FakeProvider {
    async fn complete(&self, _request: CompletionRequest) -> finagent_llm::Result<CompletionResponse> {
        match self.0 {
            Reply::Text(text) => Ok(CompletionResponse::text(text)),
            Reply::Tools => Ok(CompletionResponse::tool_calls(vec![
                ToolCall::new("call_1", "get_stock_price", r#"{"symbol": "TCS"}"#),
                ToolCall::new("call_2", "calculator", r#"{"expression": "2+2"}"#),
                ToolCall::new("call_3", "get_news", "{}"),
            ])),
            Reply::Fail => Err(LLMError::Status {
                status: 503,
                body: "connection refused".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakePrices;

#[async_trait]
impl MarketDataSource for FakePrices {
    async fn daily_closes(&self, _symbol: &str) -> finagent_market::Result<Vec<f64>> {
        Ok(vec![3500.0, 3512.456])
    }

    async fn info(&self, _symbol: &str) -> finagent_market::Result<InfoMap> {
        Ok(InfoMap::new())
    }
}

struct DownExchange;

#[async_trait]
impl ExchangeSource for DownExchange {
    async fn quote_metadata(&self, _symbol: &str) -> finagent_market::Result<InfoMap> {
        Err(FinanceError::NseError("blocked".to_string()))
    }
}

async fn spawn(reply: Reply, token: Option<&str>) -> SocketAddr {
    let market = Arc::new(MarketData::new(Arc::new(FakePrices), Arc::new(DownExchange)));
    let handler = QueryHandler::builder()
        .provider(Arc::new(FakeProvider(reply)))
        .registry(default_registry(market).unwrap())
        .build()
        .unwrap();

    let config = ServerConfig::default().with_api_token(token.map(str::to_string));
    let app = build_app(AppState::new(
        Arc::new(handler),
        config,
        finagent_utils::Config::default(),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}/api/v1{path}")
}

#[tokio::test]
async fn test_health() {
    let addr = spawn(Reply::Text("unused"), None).await;
    let response = reqwest::get(url(addr, "/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "ok");
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_chat_dispatches_tools() {
    let addr = spawn(Reply::Tools, None).await;
    let response = reqwest::Client::new()
        .post(url(addr, "/chat"))
        .json(&json!({"user_message": "TCS price, and 2+2", "sessionId": "abc-123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["session_id"], "abc-123");
    assert_eq!(
        body["data"]["reply"],
        "The current stock price of TCS.NS is ₹3512.46\n4\nUnknown tool: get_news"
    );
}

#[tokio::test]
async fn test_chat_mints_session_id() {
    let addr = spawn(Reply::Text("Namaste!"), None).await;
    let body: Value = reqwest::Client::new()
        .post(url(addr, "/chat"))
        .json(&json!({"user_message": "hello"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["reply"], "Namaste!");
    let session_id = body["data"]["session_id"].as_str().unwrap();
    assert_eq!(session_id.len(), 36);
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let addr = spawn(Reply::Text("unused"), None).await;
    let response = reqwest::Client::new()
        .post(url(addr, "/chat"))
        .json(&json!({"user_message": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], false);
    assert!(body["detail"].as_str().unwrap().contains("user_message"));
}

#[tokio::test]
async fn test_chat_provider_failure_is_bad_gateway() {
    let addr = spawn(Reply::Fail, None).await;
    let response = reqwest::Client::new()
        .post(url(addr, "/chat"))
        .json(&json!({"user_message": "price of TCS"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn test_auth_validation() {
    let addr = spawn(Reply::Text("unused"), Some("s3cret")).await;
    let client = reqwest::Client::new();

    let missing = client.get(url(addr, "/auth/validate")).send().await.unwrap();
    assert_eq!(missing.status(), 401);

    let wrong = client
        .get(url(addr, "/auth/validate"))
        .bearer_auth("nope")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 401);

    let ok = client
        .get(url(addr, "/auth/validate"))
        .bearer_auth("s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["data"]["authenticated"], true);

    let chat = client
        .post(url(addr, "/chat"))
        .json(&json!({"user_message": "hi"}))
        .send()
        .await
        .unwrap();
    assert_eq!(chat.status(), 401);
}

#[tokio::test]
async fn test_unknown_route() {
    let addr = spawn(Reply::Text("unused"), None).await;
    let response = reqwest::get(url(addr, "/missing")).await.unwrap();
    assert_eq!(response.status(), 404);
}
