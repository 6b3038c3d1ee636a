//! Market-data accessors behind the price and fundamentals tools

use crate::api::{NseClient, YahooFinanceClient};
use crate::config::FinanceConfig;
use crate::enrichment::Enrichment;
use crate::error::Result;
use crate::sources::{ExchangeSource, InfoMap, MarketDataSource};
use crate::symbol::{MARKET_SUFFIX, bare_with, normalize_with};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const NOT_AVAILABLE: &str = "N/A";

/// One labeled line of the fundamentals summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FundamentalField {
    MarketCap,
    Eps,
    PeRatio,
    DividendYield,
}

impl FundamentalField {
    /// Every field, in output order
    pub const ALL: [Self; 4] = [Self::MarketCap, Self::Eps, Self::PeRatio, Self::DividendYield];

    /// Label printed before the value
    pub fn label(self) -> &'static str {
        match self {
            Self::MarketCap => "Market Cap",
            Self::Eps => "EPS",
            Self::PeRatio => "P/E Ratio",
            Self::DividendYield => "Dividend Yield",
        }
    }

    /// Parse a user-supplied label, ignoring case and separators
    pub fn parse(label: &str) -> Option<Self> {
        let key: String = label
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match key.as_str() {
            "marketcap" | "mcap" | "marketcapitalization" => Some(Self::MarketCap),
            "eps" | "earningspershare" => Some(Self::Eps),
            "pe" | "peratio" | "pricetoearnings" => Some(Self::PeRatio),
            "dividendyield" | "dividend" | "yield" => Some(Self::DividendYield),
            _ => None,
        }
    }

    /// Fields named by `labels`, in output order; all of them when none are recognized
    pub fn select(labels: Option<&[String]>) -> Vec<Self> {
        let mut selected: Vec<Self> = labels
            .unwrap_or_default()
            .iter()
            .filter_map(|label| Self::parse(label))
            .collect();

        if selected.is_empty() {
            return Self::ALL.to_vec();
        }

        selected.sort_unstable();
        selected.dedup();
        selected
    }
}

impl fmt::Display for FundamentalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved, display-ready fundamentals for one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fundamentals {
    pub market_cap: String,
    pub eps: String,
    pub pe_ratio: String,
    pub dividend_yield: String,
}

impl Fundamentals {
    /// Combine the exchange P/E with the secondary info mapping
    pub fn resolve(exchange_pe: &Enrichment<String>, info: &InfoMap, currency: &str) -> Self {
        let market_cap = match info.get("marketCap") {
            Some(Value::Number(n)) => n
                .as_f64()
                .map_or_else(|| n.to_string(), |cap| format_market_cap(cap, currency)),
            other => display_value(other),
        };

        Self {
            market_cap,
            eps: display_value(info.get("trailingEps")),
            pe_ratio: resolve_pe(exchange_pe, info),
            dividend_yield: display_value(info.get("dividendYield")),
        }
    }

    /// Value for a single field
    pub fn get(&self, field: FundamentalField) -> &str {
        match field {
            FundamentalField::MarketCap => &self.market_cap,
            FundamentalField::Eps => &self.eps,
            FundamentalField::PeRatio => &self.pe_ratio,
            FundamentalField::DividendYield => &self.dividend_yield,
        }
    }

    /// Labeled lines for `fields`, newline-joined
    pub fn render(&self, fields: &[FundamentalField]) -> String {
        fields
            .iter()
            .map(|field| format!("{}: {}", field.label(), self.get(*field)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Fundamentals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FundamentalField::ALL))
    }
}

/// Price and fundamentals lookups over a primary exchange source and a
/// secondary market-data source
///
/// Lookups never fail outward: upstream errors are logged and rendered as
/// fallback text.
#[derive(Clone)]
pub struct MarketData {
    prices: Arc<dyn MarketDataSource>,
    exchange: Arc<dyn ExchangeSource>,
    suffix: String,
    currency: String,
}

impl MarketData {
    /// Create accessors over the given sources with NSE defaults
    pub fn new(prices: Arc<dyn MarketDataSource>, exchange: Arc<dyn ExchangeSource>) -> Self {
        Self {
            prices,
            exchange,
            suffix: MARKET_SUFFIX.to_string(),
            currency: "₹".to_string(),
        }
    }

    /// Create accessors backed by Yahoo Finance and NSE India
    pub fn from_config(config: &FinanceConfig) -> Result<Self> {
        let prices = Arc::new(YahooFinanceClient::new(config)?);
        let exchange = Arc::new(NseClient::new(config)?);

        Ok(Self::new(prices, exchange)
            .with_suffix(&config.market_suffix)
            .with_currency(&config.currency_symbol))
    }

    /// Use a different market suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Use a different currency symbol
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Latest close for `symbol`, formatted for the answer
    #[instrument(skip(self))]
    pub async fn get_quote(&self, symbol: &str) -> String {
        let symbol = normalize_with(symbol, &self.suffix);

        let closes = match self.prices.daily_closes(&symbol).await {
            Ok(closes) => closes,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price lookup failed");
                Vec::new()
            }
        };

        match closes.last() {
            Some(price) => {
                let price = round_cents(*price);
                format!(
                    "The current stock price of {symbol} is {}{price}",
                    self.currency
                )
            }
            None => format!("Couldn't fetch live price for {symbol}"),
        }
    }

    /// P/E from the exchange, if it has one
    #[instrument(skip(self))]
    pub async fn exchange_pe(&self, symbol: &str) -> Enrichment<String> {
        let bare = bare_with(symbol, &self.suffix);

        match self.exchange.quote_metadata(bare).await {
            Ok(metadata) => {
                let pe = extract_pe(&metadata);
                debug!(symbol = bare, found = pe.is_some(), "Exchange P/E lookup");
                pe.into()
            }
            Err(e) => {
                warn!(symbol = bare, error = %e, "Exchange lookup failed, falling back");
                Enrichment::FetchError(e.to_string())
            }
        }
    }

    /// Resolve fundamentals without rendering them
    pub async fn fundamentals(&self, symbol: &str, with_pe: bool) -> Fundamentals {
        let exchange_pe = if with_pe {
            self.exchange_pe(symbol).await
        } else {
            Enrichment::Absent
        };

        let normalized = normalize_with(symbol, &self.suffix);
        let info = match self.prices.info(&normalized).await {
            Ok(info) => info,
            Err(e) => {
                warn!(symbol = %normalized, error = %e, "Info lookup failed");
                InfoMap::new()
            }
        };

        Fundamentals::resolve(&exchange_pe, &info, &self.currency)
    }

    /// Market cap, EPS, P/E and dividend yield as labeled lines
    ///
    /// `fields` narrows the output to the named lines; unknown labels are
    /// ignored and an empty selection means all four.
    #[instrument(skip(self))]
    pub async fn get_fundamentals(&self, symbol: &str, fields: Option<&[String]>) -> String {
        let selected = FundamentalField::select(fields);
        let with_pe = selected.contains(&FundamentalField::PeRatio);

        self.fundamentals(symbol, with_pe).await.render(&selected)
    }
}

impl fmt::Debug for MarketData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketData")
            .field("suffix", &self.suffix)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// First usable value of `pdSymbolPe`, then `pdSectorPe`
pub fn extract_pe(metadata: &InfoMap) -> Option<String> {
    ["pdSymbolPe", "pdSectorPe"]
        .iter()
        .filter_map(|key| metadata.get(*key))
        .find(|value| is_truthy(value))
        .map(|value| display_value(Some(value)))
}

/// Exchange value, else secondary `trailingPE`, else `N/A`
pub fn resolve_pe(exchange_pe: &Enrichment<String>, info: &InfoMap) -> String {
    match exchange_pe.value() {
        Some(pe) => pe.clone(),
        None => display_value(info.get("trailingPE")),
    }
}

/// Render an upstream value for display
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Round to two decimals, printed later in shortest form
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Currency symbol plus the amount rounded and grouped in thousands
pub fn format_market_cap(cap: f64, currency: &str) -> String {
    if !cap.is_finite() {
        return format!("{currency}{cap}");
    }

    let digits = format!("{:.0}", cap.abs());
    let sign = if cap.round() < 0.0 { "-" } else { "" };
    format!("{currency}{sign}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
