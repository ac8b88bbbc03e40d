//! Symbol value object for ticker identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// An equity ticker symbol as understood by the quote source.
///
/// Examples: "VRT", "QCOM", "BRK.B"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Maximum accepted symbol length.
    pub const MAX_LEN: usize = 12;

    /// Create a new Symbol.
    ///
    /// The symbol is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Validate the symbol before it is handed to a quote source.
    ///
    /// # Errors
    ///
    /// Returns error if symbol is empty, too long, or contains invalid characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol cannot be empty".to_string(),
            });
        }

        if self.0.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: format!("Symbol '{}' exceeds maximum length", self.0),
            });
        }

        // Share classes use a dot or dash separator (BRK.B, BF-B)
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: format!("Symbol '{}' contains invalid characters", self.0),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_new_normalizes_case() {
        let s = Symbol::new(" qcom ");
        assert_eq!(s.as_str(), "QCOM");
    }

    #[test]
    fn symbol_display() {
        let s = Symbol::new("TQQQ");
        assert_eq!(format!("{s}"), "TQQQ");
    }

    #[test]
    fn symbol_validate_empty() {
        assert!(Symbol::new("").validate().is_err());
        assert!(Symbol::new("   ").validate().is_err());
    }

    #[test]
    fn symbol_validate_too_long() {
        let s = Symbol::new("A".repeat(Symbol::MAX_LEN + 1));
        assert!(s.validate().is_err());
    }

    #[test]
    fn symbol_validate_invalid_chars() {
        assert!(Symbol::new("VRT!").validate().is_err());
        assert!(Symbol::new("V RT").validate().is_err());
    }

    #[test]
    fn symbol_validate_valid() {
        assert!(Symbol::new("GOOG").validate().is_ok());
        assert!(Symbol::new("BRK.B").validate().is_ok());
        assert!(Symbol::new("BF-B").validate().is_ok());
    }

    #[test]
    fn symbol_serde_normalizes() {
        let s = Symbol::new("PFE");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"PFE\"");

        let parsed: Symbol = serde_json::from_str("\"pfe\"").unwrap();
        assert_eq!(parsed.as_str(), "PFE");
    }
}
