//! Latest price lookup

use crate::market::MarketData;
use async_trait::async_trait;
use finagent_llm::tools::schema;
use finagent_tools::{Result, Tool, parse_arguments};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool returning the latest close for an NSE symbol
#[derive(Debug, Clone)]
pub struct StockPriceTool {
    market: Arc<MarketData>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StockPriceParams {
    symbol: String,
}

impl StockPriceTool {
    pub fn new(market: Arc<MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn call(&self, arguments: &str) -> Result<String> {
        let params: StockPriceParams = parse_arguments(self.name(), arguments)?;
        Ok(self.market.get_quote(&params.symbol).await)
    }

    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Return the current stock price for an NSE symbol (e.g. RELIANCE, TCS)."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "symbol": schema::string("NSE ticker symbol, with or without the .NS suffix") }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MockExchangeSource, MockMarketDataSource};
    use finagent_tools::ToolError;

    fn tool_with_closes(closes: Vec<f64>) -> StockPriceTool {
        let mut prices = MockMarketDataSource::new();
        prices
            .expect_daily_closes()
            .returning(move |_| Ok(closes.clone()));
        let market = MarketData::new(Arc::new(prices), Arc::new(MockExchangeSource::new()));
        StockPriceTool::new(Arc::new(market))
    }

    #[tokio::test]
    async fn test_call_returns_quote() {
        let tool = tool_with_closes(vec![2950.0]);
        let out = tool.call(r#"{"symbol": "RELIANCE"}"#).await.unwrap();
        assert_eq!(out, "The current stock price of RELIANCE.NS is ₹2950");
    }

    #[tokio::test]
    async fn test_call_rejects_unexpected_arguments() {
        let tool = tool_with_closes(vec![1.0]);

        let err = tool.call(r#"{"symbol": "TCS", "cmd": "rm"}"#).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));

        let err = tool.call("").await.unwrap_err();
        assert!(err.to_string().contains("get_stock_price"));
    }
}
