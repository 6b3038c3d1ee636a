//! Restricted arithmetic evaluation

use thiserror::Error;

/// Longest expression accepted
pub const MAX_EXPRESSION_LEN: usize = 256;

/// Reasons an expression has no value
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("expression longer than {} characters", MAX_EXPRESSION_LEN)]
    TooLong,

    #[error("{0}")]
    Invalid(String),

    #[error("result is not a finite number")]
    NonFinite,
}

/// Evaluate numbers, `+ - * / % ^`, unary minus and parentheses
///
/// `**` is accepted as a spelling of `^`. Variables and functions are not
/// available: the expression is evaluated against an empty context.
pub fn try_evaluate(expression: &str) -> Result<f64, CalcError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(CalcError::Empty);
    }
    if expression.len() > MAX_EXPRESSION_LEN {
        return Err(CalcError::TooLong);
    }

    let parsed: meval::Expr = expression
        .replace("**", "^")
        .parse()
        .map_err(|e: meval::Error| CalcError::Invalid(e.to_string()))?;
    let value = parsed
        .eval_with_context(meval::Context::empty())
        .map_err(|e| CalcError::Invalid(e.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite)
    }
}

/// Evaluate and render, reporting failures as `Error: <reason>`
pub fn evaluate(expression: &str) -> String {
    match try_evaluate(expression) {
        Ok(value) => format_number(value),
        Err(e) => format!("Error: {e}"),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
