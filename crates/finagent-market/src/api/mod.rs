//! Upstream API clients

pub mod nse;
pub mod yahoo;

pub use nse::NseClient;
pub use yahoo::YahooFinanceClient;
