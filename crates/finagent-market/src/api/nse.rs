//! NSE India quote client

use crate::config::FinanceConfig;
use crate::error::{FinanceError, Result};
use crate::sources::{ExchangeSource, InfoMap};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// NSE answers scripted clients with 401 unless the request looks like a browser
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// NSE India quote-equity client
#[derive(Debug, Clone)]
pub struct NseClient {
    client: Client,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl NseClient {
    /// Create a client with a cookie store and a per-minute request quota
    pub fn new(config: &FinanceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let referer = HeaderValue::from_str(&config.nse_base_url)
            .map_err(|e| FinanceError::ConfigError(format!("invalid NSE base url: {e}")))?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        let quota = Quota::per_minute(
            NonZeroU32::new(config.nse_rate_limit).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            client,
            base_url: config.nse_base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// `metadata` object of the quote-equity response
    pub async fn get_quote_metadata(&self, bare_symbol: &str) -> Result<InfoMap> {
        self.rate_limiter.until_ready().await;

        // Session cookies are handed out by the home page.
        self.client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;

        let url = format!("{}/api/quote-equity", self.base_url);
        let body: Value = self
            .client
            .get(&url)
            .query(&[("symbol", bare_symbol)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(symbol = bare_symbol, "Fetched NSE quote");
        metadata_of(bare_symbol, body)
    }
}

fn metadata_of(symbol: &str, body: Value) -> Result<InfoMap> {
    match body {
        Value::Object(mut map) => match map.remove("metadata") {
            Some(Value::Object(metadata)) => Ok(metadata),
            Some(_) | None => Err(FinanceError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "response has no metadata".to_string(),
            }),
        },
        other => Err(FinanceError::NseError(format!(
            "unexpected response shape: {other}"
        ))),
    }
}

#[async_trait]
impl ExchangeSource for NseClient {
    async fn quote_metadata(&self, bare_symbol: &str) -> Result<InfoMap> {
        self.get_quote_metadata(bare_symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_extraction() {
        let body = json!({"info": {}, "metadata": {"pdSymbolPe": 28.4, "pdSectorPe": 31.0}});
        let metadata = metadata_of("TCS", body).unwrap();
        assert_eq!(metadata["pdSymbolPe"], 28.4);
    }

    #[test]
    fn test_missing_metadata() {
        let err = metadata_of("TCS", json!({"info": {}})).unwrap_err();
        assert!(matches!(err, FinanceError::DataUnavailable { .. }));

        let err = metadata_of("TCS", json!([])).unwrap_err();
        assert!(matches!(err, FinanceError::NseError(_)));
    }

    #[test]
    fn test_client_construction() {
        assert!(NseClient::new(&FinanceConfig::default()).is_ok());
    }
}
