//! Tools exposed to the model

pub mod calculator;
pub mod financial_summary;
pub mod stock_price;

pub use calculator::CalculatorTool;
pub use financial_summary::FinancialSummaryTool;
pub use stock_price::StockPriceTool;

use crate::error::Result;
use crate::market::MarketData;
use finagent_tools::ToolRegistry;
use std::sync::Arc;

/// Registry holding the price, financial summary and calculator tools
pub fn default_registry(market: Arc<MarketData>) -> Result<ToolRegistry> {
    let registry = ToolRegistry::new()
        .with_tool(Arc::new(StockPriceTool::new(Arc::clone(&market))))?
        .with_tool(Arc::new(FinancialSummaryTool::new(market)))?
        .with_tool(Arc::new(CalculatorTool))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MockExchangeSource, MockMarketDataSource};

    #[test]
    fn test_default_registry() {
        let market = MarketData::new(
            Arc::new(MockMarketDataSource::new()),
            Arc::new(MockExchangeSource::new()),
        );
        let registry = default_registry(Arc::new(market)).unwrap();

        assert_eq!(
            registry.names(),
            vec!["get_stock_price", "get_financial_summary", "calculator"]
        );
        for definition in registry.definitions() {
            assert_eq!(definition.input_schema["type"], "object");
            assert!(!definition.description.is_empty());
        }
    }
}
