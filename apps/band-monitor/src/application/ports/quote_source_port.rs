//! Quote Source Port (Driven Port)
//!
//! Interface for historical closes and live prices.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::shared::Symbol;

/// Quote source error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteSourceError {
    /// Provider answered but has nothing for the symbol yet.
    #[error("No data available for {symbol}")]
    DataUnavailable {
        /// Requested symbol.
        symbol: String,
    },

    /// Network or HTTP failure.
    #[error("Quote transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// Response could not be decoded.
    #[error("Malformed quote data: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },

    /// Call exceeded the configured I/O timeout.
    #[error("Quote request timed out after {millis}ms")]
    Timeout {
        /// Elapsed budget.
        millis: u64,
    },
}

impl QuoteSourceError {
    /// Create a data-unavailable error.
    pub fn unavailable(symbol: &Symbol) -> Self {
        Self::DataUnavailable {
            symbol: symbol.to_string(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a malformed-data error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Short label for metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "data_unavailable",
            Self::Transport { .. } => "transport",
            Self::Malformed { .. } => "malformed",
            Self::Timeout { .. } => "timeout",
        }
    }

    /// Whether the failure warrants an operator notification.
    ///
    /// Missing data is expected early in the session and is only logged.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        !matches!(self, Self::DataUnavailable { .. })
    }
}

/// Port for market data used by the monitor.
#[async_trait]
pub trait QuoteSourcePort: Send + Sync {
    /// Daily closes for roughly the last `lookback_days` calendar days,
    /// oldest first.
    async fn historical_daily_closes(
        &self,
        symbol: &Symbol,
        lookback_days: u32,
    ) -> Result<Vec<Decimal>, QuoteSourceError>;

    /// Close of the most recent completed session.
    async fn previous_session_close(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError>;

    /// Most recent traded price in the current session.
    async fn latest_intraday_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_data_is_not_a_fault() {
        assert!(!QuoteSourceError::unavailable(&Symbol::new("VRT")).is_fault());
        assert!(QuoteSourceError::transport("reset").is_fault());
        assert!(QuoteSourceError::malformed("bad json").is_fault());
        assert!(QuoteSourceError::Timeout { millis: 100 }.is_fault());
    }

    #[test]
    fn error_display() {
        let err = QuoteSourceError::unavailable(&Symbol::new("soxl"));
        assert_eq!(err.to_string(), "No data available for SOXL");
        assert_eq!(err.kind(), "data_unavailable");
    }
}
