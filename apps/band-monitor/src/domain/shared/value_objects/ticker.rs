//! Configured ticker: symbol plus the label used in messages.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// A ticker the operator asked to watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSpec {
    /// Symbol passed to the quote source.
    pub symbol: Symbol,
    /// Human label used only in notifications.
    #[serde(default)]
    pub display_name: String,
}

impl TickerSpec {
    /// Create a ticker spec.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
        }
    }

    /// Label for messages: the display name, followed by the symbol when they differ.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self.display_name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(self.symbol.as_str()) {
            self.symbol.to_string()
        } else {
            format!("{name} ({})", self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_includes_symbol_when_names_differ() {
        let spec = TickerSpec::new("vrt", "Vertiv");
        assert_eq!(spec.label(), "Vertiv (VRT)");
    }

    #[test]
    fn label_collapses_identical_names() {
        let spec = TickerSpec::new("SOXL", "soxl");
        assert_eq!(spec.label(), "SOXL");
    }

    #[test]
    fn display_name_is_optional() {
        let spec: TickerSpec = serde_json::from_str(r#"{"symbol": "dgro"}"#).unwrap();
        assert_eq!(spec.display_name, "");
        assert_eq!(spec.label(), "DGRO");
    }
}
