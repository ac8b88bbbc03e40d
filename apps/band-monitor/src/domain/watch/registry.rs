//! Watch Registry
//!
//! Owns every [`TickerWatch`] for the session, in configured order.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::errors::WatchError;
use super::ticker_watch::TickerWatch;
use crate::domain::band::Band;
use crate::domain::shared::{Symbol, TickerSpec};

/// Per-session registry of ticker watches.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    watches: Vec<TickerWatch>,
    index: HashMap<Symbol, usize>,
}

impl WatchRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a watch for a ticker. Never overwrites an existing one.
    pub fn seed(
        &mut self,
        spec: TickerSpec,
        band: Band,
        reference_close: Decimal,
    ) -> Result<&TickerWatch, WatchError> {
        if self.index.contains_key(&spec.symbol) {
            return Err(WatchError::AlreadySeeded {
                symbol: spec.symbol,
            });
        }
        if reference_close <= Decimal::ZERO {
            return Err(WatchError::InvalidReferenceClose {
                symbol: spec.symbol,
                reference_close,
            });
        }

        let position = self.watches.len();
        self.index.insert(spec.symbol.clone(), position);
        self.watches
            .push(TickerWatch::new(spec, band, reference_close));

        Ok(&self.watches[position])
    }

    /// Look up a watch.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&TickerWatch> {
        self.index.get(symbol).map(|&i| &self.watches[i])
    }

    /// False for unseeded symbols.
    #[must_use]
    pub fn is_resolved(&self, symbol: &Symbol) -> bool {
        self.get(symbol).is_some_and(TickerWatch::is_resolved)
    }

    /// Mark a ticker as alerted.
    ///
    /// Returns `Ok(true)` when this call flipped the flag and `Ok(false)`
    /// when it was already set.
    pub fn mark_resolved(&mut self, symbol: &Symbol) -> Result<bool, WatchError> {
        let Some(&i) = self.index.get(symbol) else {
            return Err(WatchError::NotSeeded {
                symbol: symbol.clone(),
            });
        };
        Ok(self.watches[i].resolve())
    }

    /// At least one ticker is seeded and all seeded tickers are resolved.
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        !self.watches.is_empty() && self.watches.iter().all(TickerWatch::is_resolved)
    }

    /// Watches in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &TickerWatch> {
        self.watches.iter()
    }

    /// Symbols still waiting for a crossing, in configured order.
    #[must_use]
    pub fn unresolved_symbols(&self) -> Vec<Symbol> {
        self.watches
            .iter()
            .filter(|w| !w.is_resolved())
            .map(|w| w.symbol().clone())
            .collect()
    }

    /// Number of seeded tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// No ticker has been seeded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}
