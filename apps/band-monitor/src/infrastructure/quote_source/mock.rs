//! Mock quote source for testing.
//!
//! Each symbol has a fixed history, a reference close and a script of
//! intraday answers. The script is consumed front to back and its last
//! entry repeats forever.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::application::ports::{QuoteSourceError, QuoteSourcePort};
use crate::domain::shared::Symbol;

#[derive(Debug, Default)]
struct ScriptedTicker {
    closes: Vec<Decimal>,
    reference_close: Option<Decimal>,
    intraday: VecDeque<Result<Decimal, QuoteSourceError>>,
    intraday_calls: usize,
}

/// Scripted quote source.
#[derive(Debug, Default)]
pub struct MockQuoteSource {
    tickers: Mutex<HashMap<Symbol, ScriptedTicker>>,
    delay: Option<Duration>,
}

impl MockQuoteSource {
    /// Create an empty source. Every symbol is unavailable until scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set daily closes and the previous session close.
    #[must_use]
    pub fn with_history(
        mut self,
        symbol: impl Into<Symbol>,
        closes: Vec<Decimal>,
        reference_close: Decimal,
    ) -> Self {
        let ticker = self.tickers.get_mut().entry(symbol.into()).or_default();
        ticker.closes = closes;
        ticker.reference_close = Some(reference_close);
        self
    }

    /// Append intraday prices to the script.
    #[must_use]
    pub fn with_prices(mut self, symbol: impl Into<Symbol>, prices: Vec<Decimal>) -> Self {
        self.tickers
            .get_mut()
            .entry(symbol.into())
            .or_default()
            .intraday
            .extend(prices.into_iter().map(Ok));
        self
    }

    /// Append an intraday failure to the script.
    #[must_use]
    pub fn with_price_error(mut self, symbol: impl Into<Symbol>, error: QuoteSourceError) -> Self {
        self.tickers
            .get_mut()
            .entry(symbol.into())
            .or_default()
            .intraday
            .push_back(Err(error));
        self
    }

    /// Delay every call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of intraday price requests made for a symbol.
    #[must_use]
    pub fn intraday_calls(&self, symbol: &Symbol) -> usize {
        self.tickers
            .lock()
            .get(symbol)
            .map_or(0, |ticker| ticker.intraday_calls)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl QuoteSourcePort for MockQuoteSource {
    async fn historical_daily_closes(
        &self,
        symbol: &Symbol,
        _lookback_days: u32,
    ) -> Result<Vec<Decimal>, QuoteSourceError> {
        self.pause().await;
        self.tickers
            .lock()
            .get(symbol)
            .filter(|ticker| !ticker.closes.is_empty())
            .map(|ticker| ticker.closes.clone())
            .ok_or_else(|| QuoteSourceError::unavailable(symbol))
    }

    async fn previous_session_close(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError> {
        self.pause().await;
        self.tickers
            .lock()
            .get(symbol)
            .and_then(|ticker| ticker.reference_close)
            .ok_or_else(|| QuoteSourceError::unavailable(symbol))
    }

    async fn latest_intraday_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteSourceError> {
        self.pause().await;
        let mut tickers = self.tickers.lock();
        let Some(ticker) = tickers.get_mut(symbol) else {
            return Err(QuoteSourceError::unavailable(symbol));
        };
        ticker.intraday_calls += 1;

        let next = if ticker.intraday.len() > 1 {
            ticker.intraday.pop_front()
        } else {
            ticker.intraday.front().cloned()
        };
        next.unwrap_or_else(|| Err(QuoteSourceError::unavailable(symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn script_repeats_last_entry() {
        let source = MockQuoteSource::new()
            .with_price_error("VRT", QuoteSourceError::transport("reset"))
            .with_prices("VRT", vec![dec!(10), dec!(11)]);
        let vrt = Symbol::new("VRT");

        assert!(source.latest_intraday_price(&vrt).await.is_err());
        assert_eq!(source.latest_intraday_price(&vrt).await.unwrap(), dec!(10));
        assert_eq!(source.latest_intraday_price(&vrt).await.unwrap(), dec!(11));
        assert_eq!(source.latest_intraday_price(&vrt).await.unwrap(), dec!(11));
        assert_eq!(source.intraday_calls(&vrt), 4);
    }

    #[tokio::test]
    async fn unknown_symbol_is_unavailable() {
        let source = MockQuoteSource::new();
        let err = source
            .previous_session_close(&Symbol::new("PFE"))
            .await
            .unwrap_err();
        assert!(!err.is_fault());
    }

    #[tokio::test]
    async fn history_and_reference() {
        let source = MockQuoteSource::new().with_history("GOOG", vec![dec!(1), dec!(2)], dec!(2));
        let goog = Symbol::new("GOOG");

        assert_eq!(
            source.historical_daily_closes(&goog, 10).await.unwrap(),
            vec![dec!(1), dec!(2)]
        );
        assert_eq!(source.previous_session_close(&goog).await.unwrap(), dec!(2));
    }
}
