//! Outcome of a best-effort lookup

use std::fmt;

/// Result of an optional enrichment from an upstream source
///
/// Keeps "the source had no value" apart from "the source could not be
/// reached", while still letting callers fall back the same way in both
/// cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    /// The source supplied a value
    Value(T),
    /// The source answered without a usable value
    Absent,
    /// The lookup itself failed
    FetchError(String),
}

impl<T> Enrichment<T> {
    /// Borrow the value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the lookup failed
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchError(_))
    }
}

impl<T> From<Option<T>> for Enrichment<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Enrichment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Absent => f.write_str("absent"),
            Self::FetchError(e) => write!(f, "fetch error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(Enrichment::from(Some(3)), Enrichment::Value(3));
        assert_eq!(Enrichment::<i32>::from(None), Enrichment::Absent);
    }

    #[test]
    fn test_accessors() {
        let failed: Enrichment<String> = Enrichment::FetchError("timeout".to_string());
        assert!(failed.is_fetch_error());
        assert!(failed.value().is_none());
        assert_eq!(failed.to_string(), "fetch error: timeout");
        assert_eq!(Enrichment::Value("24.1").value(), Some(&"24.1"));
    }
}
