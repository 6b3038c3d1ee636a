//! Yahoo Finance client

use crate::config::FinanceConfig;
use crate::error::{FinanceError, Result};
use crate::sources::{InfoMap, MarketDataSource};
use async_trait::async_trait;
use serde_json::{Number, Value};
use std::fmt;
use tokio::sync::Mutex;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client backed by a single `YahooConnector`
///
/// The connector caches the session cookie and crumb that the quote summary
/// endpoint requires, so it is kept for the life of the client. Summary
/// lookups need exclusive access, hence the mutex.
pub struct YahooFinanceClient {
    connector: Mutex<yahoo::YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a client from configuration
    pub fn new(config: &FinanceConfig) -> Result<Self> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }

    /// Close prices for the last few sessions
    pub async fn get_recent_closes(&self, symbol: &str) -> Result<Vec<f64>> {
        let connector = self.connector.lock().await;

        let response = connector
            .get_quote_range(symbol, "1d", "5d")
            .await
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        debug!(symbol, count = quotes.len(), "Fetched daily quotes");

        Ok(quotes
            .iter()
            .map(|q| q.close)
            .filter(|close| close.is_finite() && *close > 0.0)
            .collect())
    }

    /// `trailingEps`, `trailingPE`, `marketCap` and `dividendYield` from the quote summary
    pub async fn get_info(&self, symbol: &str) -> Result<InfoMap> {
        let summary = self
            .connector
            .lock()
            .await
            .get_ticker_info(symbol)
            .await
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        let info = info_from_summary(symbol, &summary)?;
        debug!(symbol, fields = info.len(), "Fetched quote summary");
        Ok(info)
    }
}

impl fmt::Debug for YahooFinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooFinanceClient").finish_non_exhaustive()
    }
}

fn info_from_summary(symbol: &str, summary: &yahoo::YQuoteSummary) -> Result<InfoMap> {
    let quote_summary = summary
        .quote_summary
        .as_ref()
        .ok_or_else(|| unavailable(symbol, "response has no quoteSummary"))?;

    if let Some(error) = &quote_summary.error {
        return Err(FinanceError::YahooFinanceError(
            error
                .description
                .clone()
                .unwrap_or_else(|| format!("{error:?}")),
        ));
    }

    let data = quote_summary
        .result
        .as_ref()
        .and_then(|results| results.first())
        .ok_or_else(|| unavailable(symbol, "empty quote summary"))?;

    let mut info = InfoMap::new();
    if let Some(detail) = &data.summary_detail {
        insert_f64(&mut info, "trailingPE", detail.trailing_pe);
        insert_f64(&mut info, "dividendYield", detail.dividend_yield);
        if let Some(cap) = detail.market_cap {
            info.insert("marketCap".to_string(), Value::from(cap));
        }
    }
    if let Some(stats) = &data.default_key_statistics {
        insert_f64(&mut info, "trailingEps", stats.trailing_eps);
    }

    Ok(info)
}

fn insert_f64(info: &mut InfoMap, key: &str, value: Option<f64>) {
    if let Some(number) = value.and_then(Number::from_f64) {
        info.insert(key.to_string(), Value::Number(number));
    }
}

fn unavailable(symbol: &str, reason: &str) -> FinanceError {
    FinanceError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<f64>> {
        self.get_recent_closes(symbol).await
    }

    async fn info(&self, symbol: &str) -> Result<InfoMap> {
        self.get_info(symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(body: &str) -> yahoo::YQuoteSummary {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_info_from_summary_maps_fields() {
        let body = r#"{"quoteSummary":{"result":[{
            "summaryDetail":{"trailingPE":28.9,"marketCap":1234567,"dividendYield":0.012},
            "defaultKeyStatistics":{"trailingEps":120.5}
        }],"error":null}}"#;

        let info = info_from_summary("TCS.NS", &summary(body)).unwrap();
        assert_eq!(info["trailingPE"], 28.9);
        assert_eq!(info["marketCap"], 1_234_567);
        assert_eq!(info["dividendYield"], 0.012);
        assert_eq!(info["trailingEps"], 120.5);
    }

    #[test]
    fn test_info_from_summary_skips_missing_modules() {
        let body = r#"{"quoteSummary":{"result":[{"summaryDetail":{"marketCap":42}}],"error":null}}"#;

        let info = info_from_summary("TCS.NS", &summary(body)).unwrap();
        assert_eq!(info.len(), 1);
        assert!(!info.contains_key("trailingEps"));
    }

    #[test]
    fn test_info_from_summary_errors() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: NOSUCH.NS"}}}"#;
        let err = info_from_summary("NOSUCH.NS", &summary(body)).unwrap_err();
        assert!(err.to_string().contains("Quote not found"));

        let body = r#"{"quoteSummary":{"result":[],"error":null}}"#;
        let err = info_from_summary("NOSUCH.NS", &summary(body)).unwrap_err();
        assert!(matches!(err, FinanceError::DataUnavailable { .. }));

        let err = info_from_summary("X.NS", &summary(r#"{"finance":null}"#)).unwrap_err();
        assert!(matches!(err, FinanceError::DataUnavailable { .. }));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_closes() {
        let client = YahooFinanceClient::new(&FinanceConfig::default()).unwrap();
        let closes = client.get_recent_closes("TCS.NS").await.unwrap();
        assert!(!closes.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_info() {
        let client = YahooFinanceClient::new(&FinanceConfig::default()).unwrap();
        let info = client.get_info("TCS.NS").await.unwrap();
        assert!(info.contains_key("marketCap"));
    }
}
