//! Watch Errors

use thiserror::Error;

use crate::domain::shared::Symbol;

/// Errors raised by the watch registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WatchError {
    /// The symbol already has a watch for this session.
    #[error("Ticker already seeded: {symbol}")]
    AlreadySeeded {
        /// Offending symbol.
        symbol: Symbol,
    },

    /// The symbol was never seeded.
    #[error("Ticker not seeded: {symbol}")]
    NotSeeded {
        /// Offending symbol.
        symbol: Symbol,
    },

    /// The reference close cannot anchor a band.
    #[error("Invalid reference close for {symbol}: {reference_close}")]
    InvalidReferenceClose {
        /// Offending symbol.
        symbol: Symbol,
        /// Rejected value.
        reference_close: rust_decimal::Decimal,
    },
}
