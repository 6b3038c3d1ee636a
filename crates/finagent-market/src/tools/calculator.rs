//! Arithmetic tool

use crate::calculator::evaluate;
use async_trait::async_trait;
use finagent_llm::tools::schema;
use finagent_tools::{Result, Tool, parse_arguments};
use serde::Deserialize;
use serde_json::{Value, json};

/// Tool evaluating plain arithmetic expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CalculatorParams {
    expression: String,
}

#[async_trait]
impl Tool for CalculatorTool {
    async fn call(&self, arguments: &str) -> Result<String> {
        let params: CalculatorParams = parse_arguments(self.name(), arguments)?;
        Ok(evaluate(&params.expression))
    }

    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform simple math calculations. Supports + - * / % ^ (or **) and parentheses."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "expression": schema::string("Arithmetic expression, e.g. (2950 - 2800) / 2800 * 100") }),
            &["expression"],
        )
    }
}
