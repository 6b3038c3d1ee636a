//! Fundamentals lookup

use crate::market::MarketData;
use async_trait::async_trait;
use finagent_llm::tools::schema;
use finagent_tools::{Result, Tool, parse_arguments};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool returning market cap, EPS, P/E ratio and dividend yield
#[derive(Debug, Clone)]
pub struct FinancialSummaryTool {
    market: Arc<MarketData>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FinancialSummaryParams {
    symbol: String,
    #[serde(default)]
    fields: Option<Vec<String>>,
}

impl FinancialSummaryTool {
    pub fn new(market: Arc<MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for FinancialSummaryTool {
    async fn call(&self, arguments: &str) -> Result<String> {
        let params: FinancialSummaryParams = parse_arguments(self.name(), arguments)?;
        Ok(self
            .market
            .get_fundamentals(&params.symbol, params.fields.as_deref())
            .await)
    }

    fn name(&self) -> &str {
        "get_financial_summary"
    }

    fn description(&self) -> &str {
        "Fetch Market Cap, EPS, P/E Ratio and Dividend Yield for an NSE symbol. \
         Optionally restrict the answer to specific fields."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("NSE ticker symbol, with or without the .NS suffix"),
                "fields": schema::array(
                    "Subset of: market_cap, eps, pe_ratio, dividend_yield (all when omitted)",
                    schema::string("Field name"),
                ),
            }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::sources::{MockExchangeSource, MockMarketDataSource};
    use serde_json::Map;

    fn tool() -> FinancialSummaryTool {
        let mut prices = MockMarketDataSource::new();
        prices.expect_info().returning(|_| {
            let mut info = Map::new();
            info.insert("trailingEps".to_string(), json!(42.1));
            info.insert("marketCap".to_string(), json!(5_000_000));
            Ok(info)
        });
        let mut exchange = MockExchangeSource::new();
        exchange
            .expect_quote_metadata()
            .returning(|_| Err(FinanceError::NseError("403".to_string())));

        let market = MarketData::new(Arc::new(prices), Arc::new(exchange));
        FinancialSummaryTool::new(Arc::new(market))
    }

    #[tokio::test]
    async fn test_call_all_fields() {
        let out = tool().call(r#"{"symbol": "HDFCBANK"}"#).await.unwrap();
        assert_eq!(
            out,
            "Market Cap: ₹5,000,000\nEPS: 42.1\nP/E Ratio: N/A\nDividend Yield: N/A"
        );
    }

    #[tokio::test]
    async fn test_call_selected_fields() {
        let out = tool()
            .call(r#"{"symbol": "HDFCBANK", "fields": ["eps", "market_cap"]}"#)
            .await
            .unwrap();
        assert_eq!(out, "Market Cap: ₹5,000,000\nEPS: 42.1");
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = tool().input_schema();
        assert_eq!(schema["required"], json!(["symbol"]));
        assert_eq!(schema["properties"]["fields"]["type"], "array");
    }
}
