//! Quote Source Adapters
//!
//! Implementations of `QuoteSourcePort`.

pub mod alpaca;
pub mod mock;

pub use alpaca::{AlpacaQuoteConfig, AlpacaQuoteSource};
pub use mock::MockQuoteSource;
