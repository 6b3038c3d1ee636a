//! Ticker symbol normalization

/// Suffix qualifying a bare ticker for the National Stock Exchange of India
pub const MARKET_SUFFIX: &str = ".NS";

/// Append `suffix` unless the symbol already carries it
///
/// Surrounding whitespace is dropped. Applying this twice gives the same
/// result as applying it once.
pub fn normalize_with(symbol: &str, suffix: &str) -> String {
    let symbol = symbol.trim();
    if symbol.ends_with(suffix) {
        symbol.to_string()
    } else {
        format!("{symbol}{suffix}")
    }
}

/// Normalize with the default NSE suffix
pub fn normalize(symbol: &str) -> String {
    normalize_with(symbol, MARKET_SUFFIX)
}

/// Strip the market suffix, giving the bare ticker the exchange API expects
pub fn bare_with<'a>(symbol: &'a str, suffix: &str) -> &'a str {
    let symbol = symbol.trim();
    symbol.strip_suffix(suffix).unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_suffix_once() {
        assert_eq!(normalize("RELIANCE"), "RELIANCE.NS");
        assert_eq!(normalize("RELIANCE.NS"), "RELIANCE.NS");
        assert_eq!(normalize(&normalize("TCS")), normalize("TCS"));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  INFY "), "INFY.NS");
    }

    #[test]
    fn test_custom_suffix() {
        assert_eq!(normalize_with("RELIANCE", ".BO"), "RELIANCE.BO");
        assert_eq!(normalize_with("RELIANCE.BO", ".BO"), "RELIANCE.BO");
    }

    #[test]
    fn test_bare_symbol() {
        assert_eq!(bare_with("RELIANCE.NS", MARKET_SUFFIX), "RELIANCE");
        assert_eq!(bare_with("RELIANCE", MARKET_SUFFIX), "RELIANCE");
    }
}
