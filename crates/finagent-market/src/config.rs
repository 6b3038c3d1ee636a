//! Configuration for market data and query handling

use crate::error::{FinanceError, Result};
use crate::symbol::MARKET_SUFFIX;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat model, served through the Hugging Face router
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";

const DEFAULT_NSE_BASE_URL: &str = "https://www.nseindia.com";

/// Configuration for the finance agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceConfig {
    /// Suffix appended to bare tickers before secondary-source lookups
    pub market_suffix: String,

    /// Currency symbol prefixed to prices and market caps
    pub currency_symbol: String,

    /// Timeout for each upstream HTTP request
    pub request_timeout: Duration,

    /// Maximum NSE requests per minute
    pub nse_rate_limit: u32,

    /// NSE site root (quote API lives under `/api`)
    pub nse_base_url: String,

    /// Chat model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Generation budget per completion
    pub max_tokens: usize,

    /// System prompt override
    pub system_prompt: Option<String>,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            market_suffix: MARKET_SUFFIX.to_string(),
            currency_symbol: "₹".to_string(),
            request_timeout: Duration::from_secs(30),
            nse_rate_limit: 30,
            nse_base_url: DEFAULT_NSE_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: finagent_llm::completion::DEFAULT_MAX_TOKENS,
            system_prompt: None,
        }
    }
}

impl FinanceConfig {
    /// Create a new configuration builder
    pub fn builder() -> FinanceConfigBuilder {
        FinanceConfigBuilder::default()
    }

    /// Defaults overridden by `OPENAI_MODEL` and `FINAGENT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.market_suffix.starts_with('.') || self.market_suffix.len() < 2 {
            return Err(FinanceError::ConfigError(format!(
                "market_suffix must look like '.NS', got '{}'",
                self.market_suffix
            )));
        }

        if self.model.trim().is_empty() {
            return Err(FinanceError::ConfigError("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(FinanceError::ConfigError(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(FinanceError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.nse_rate_limit == 0 {
            return Err(FinanceError::ConfigError(
                "nse_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for FinanceConfig
#[derive(Debug, Default)]
pub struct FinanceConfigBuilder {
    market_suffix: Option<String>,
    currency_symbol: Option<String>,
    request_timeout: Option<Duration>,
    nse_rate_limit: Option<u32>,
    nse_base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    system_prompt: Option<String>,
}

impl FinanceConfigBuilder {
    /// Set the market suffix
    pub fn market_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.market_suffix = Some(suffix.into());
        self
    }

    /// Set the currency symbol
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    /// Set the upstream request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the NSE requests-per-minute limit
    pub fn nse_rate_limit(mut self, per_minute: u32) -> Self {
        self.nse_rate_limit = Some(per_minute);
        self
    }

    /// Point the NSE client at another host
    pub fn nse_base_url(mut self, url: impl Into<String>) -> Self {
        self.nse_base_url = Some(url.into());
        self
    }

    /// Set the chat model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the generation budget
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Override the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Read `OPENAI_MODEL` and `FINAGENT_TIMEOUT_SECS` when set
    pub fn with_env(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.model = Some(model);
        }
        if let Some(secs) = std::env::var("FINAGENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FinanceConfig> {
        let defaults = FinanceConfig::default();

        let config = FinanceConfig {
            market_suffix: self.market_suffix.unwrap_or(defaults.market_suffix),
            currency_symbol: self.currency_symbol.unwrap_or(defaults.currency_symbol),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            nse_rate_limit: self.nse_rate_limit.unwrap_or(defaults.nse_rate_limit),
            nse_base_url: self.nse_base_url.unwrap_or(defaults.nse_base_url),
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            system_prompt: self.system_prompt.or(defaults.system_prompt),
        };

        config.validate()?;
        Ok(config)
    }
}
