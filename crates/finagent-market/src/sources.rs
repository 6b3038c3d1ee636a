//! Source traits the market-data accessors are written against

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Loosely typed field mapping returned by upstream quote endpoints
pub type InfoMap = Map<String, Value>;

/// Secondary source: price history and the per-symbol info mapping
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Recent daily closing prices, oldest first
    async fn daily_closes(&self, symbol: &str) -> Result<Vec<f64>>;

    /// Info mapping carrying `trailingEps`, `trailingPE`, `marketCap`, `dividendYield`
    async fn info(&self, symbol: &str) -> Result<InfoMap>;
}

/// Primary source: exchange quote metadata keyed by bare ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeSource: Send + Sync {
    /// Quote metadata carrying `pdSymbolPe` / `pdSectorPe`
    async fn quote_metadata(&self, bare_symbol: &str) -> Result<InfoMap>;
}
