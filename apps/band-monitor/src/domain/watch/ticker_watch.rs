//! Ticker Watch Entity

use rust_decimal::Decimal;

use crate::domain::band::{Band, Signal};
use crate::domain::shared::{Symbol, TickerSpec};

/// One monitored ticker for the current session.
///
/// The reference close is captured once when the watch is created and never
/// changes. `resolved` only moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerWatch {
    spec: TickerSpec,
    band: Band,
    reference_close: Decimal,
    resolved: bool,
}

impl TickerWatch {
    pub(super) const fn new(spec: TickerSpec, band: Band, reference_close: Decimal) -> Self {
        Self {
            spec,
            band,
            reference_close,
            resolved: false,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.spec.symbol
    }

    /// Symbol and display name.
    #[must_use]
    pub const fn spec(&self) -> &TickerSpec {
        &self.spec
    }

    /// Band derived at seeding.
    #[must_use]
    pub const fn band(&self) -> &Band {
        &self.band
    }

    /// Previous session close.
    #[must_use]
    pub const fn reference_close(&self) -> Decimal {
        self.reference_close
    }

    /// Buy trigger price.
    #[must_use]
    pub fn buy_trigger(&self) -> Decimal {
        self.band.buy_trigger(self.reference_close)
    }

    /// Sell trigger price.
    #[must_use]
    pub fn sell_trigger(&self) -> Decimal {
        self.band.sell_trigger(self.reference_close)
    }

    /// Whether an alert has already been sent.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Classify a live price against this watch's band.
    #[must_use]
    pub fn classify(&self, price: Decimal) -> Signal {
        self.band.classify(self.reference_close, price)
    }

    /// Returns true only on the first call.
    pub(super) fn resolve(&mut self) -> bool {
        let transitioned = !self.resolved;
        self.resolved = true;
        transitioned
    }
}
