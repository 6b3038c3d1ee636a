//! Finance query agent for NSE-listed equities
//!
//! This crate answers natural-language finance questions by letting a
//! language model pick among three tools:
//!
//! - `get_stock_price`: latest close from Yahoo Finance
//! - `get_financial_summary`: market cap, EPS, P/E ratio and dividend yield,
//!   with the P/E taken from NSE India when it has one
//! - `calculator`: plain arithmetic, no names or function calls
//!
//! [`QueryHandler`] sends the query to the model once and dispatches the
//! tool calls it proposes, in order, concatenating their output.
//!
//! # Example
//!
//! ```rust,ignore
//! use finagent_llm::providers::OpenAIProvider;
//! use finagent_market::{FinanceConfig, QueryHandler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FinanceConfig::from_env()?;
//!     let provider = Arc::new(OpenAIProvider::from_env()?);
//!     let handler = QueryHandler::from_config(provider, &config)?;
//!
//!     println!("{}", handler.handle_query("Dividend yield of RELIANCE?").await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod calculator;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod handler;
pub mod market;
pub mod prompts;
pub mod sources;
pub mod symbol;
pub mod tools;

pub use config::FinanceConfig;
pub use enrichment::Enrichment;
pub use error::{FinanceError, Result};
pub use handler::{HandlerConfig, QueryHandler, QueryHandlerBuilder};
pub use market::{FundamentalField, Fundamentals, MarketData};
pub use sources::{ExchangeSource, InfoMap, MarketDataSource};
pub use tools::{CalculatorTool, FinancialSummaryTool, StockPriceTool, default_registry};
