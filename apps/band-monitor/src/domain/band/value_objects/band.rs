//! Band Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BandStrategy, Signal};

/// Deviation band expressed in daily-return space.
///
/// Edges are converted to prices against a reference close with
/// [`Band::buy_trigger`] and [`Band::sell_trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    strategy: BandStrategy,
    mean: Decimal,
    std_dev: Decimal,
    multiplier: Decimal,
}

impl Band {
    /// Band at `mean ± multiplier·std_dev`.
    #[must_use]
    pub const fn mean_deviation(mean: Decimal, std_dev: Decimal, multiplier: Decimal) -> Self {
        Self {
            strategy: BandStrategy::MeanDeviation,
            mean,
            std_dev,
            multiplier,
        }
    }

    /// Band at `± multiplier·std_dev` around zero.
    #[must_use]
    pub const fn symmetric(std_dev: Decimal, multiplier: Decimal) -> Self {
        Self {
            strategy: BandStrategy::SymmetricDeviation,
            mean: Decimal::ZERO,
            std_dev,
            multiplier,
        }
    }

    /// Strategy that produced the band.
    #[must_use]
    pub const fn strategy(&self) -> BandStrategy {
        self.strategy
    }

    /// Mean daily return (zero for symmetric bands).
    #[must_use]
    pub const fn mean(&self) -> Decimal {
        self.mean
    }

    /// Standard deviation of daily returns.
    #[must_use]
    pub const fn std_dev(&self) -> Decimal {
        self.std_dev
    }

    /// Half-width of the band: `multiplier·std_dev`.
    #[must_use]
    pub fn threshold(&self) -> Decimal {
        self.multiplier * self.std_dev
    }

    /// Lower edge as a return.
    #[must_use]
    pub fn lower_return(&self) -> Decimal {
        self.mean - self.threshold()
    }

    /// Upper edge as a return.
    #[must_use]
    pub fn upper_return(&self) -> Decimal {
        self.mean + self.threshold()
    }

    /// Price at which a buy alert fires.
    #[must_use]
    pub fn buy_trigger(&self, reference_close: Decimal) -> Decimal {
        reference_close * (Decimal::ONE + self.lower_return())
    }

    /// Price at which a sell alert fires.
    #[must_use]
    pub fn sell_trigger(&self, reference_close: Decimal) -> Decimal {
        reference_close * (Decimal::ONE + self.upper_return())
    }

    /// Relative move of `price` from `reference_close`.
    ///
    /// Returns `None` for a zero reference close.
    #[must_use]
    pub fn deviation(reference_close: Decimal, price: Decimal) -> Option<Decimal> {
        (price - reference_close).checked_div(reference_close)
    }

    /// Classify a live price.
    ///
    /// Edges are exclusive: a price sitting exactly on an edge is inside.
    #[must_use]
    pub fn classify(&self, reference_close: Decimal, price: Decimal) -> Signal {
        let Some(deviation) = Self::deviation(reference_close, price) else {
            return Signal::None;
        };

        match self.strategy {
            BandStrategy::MeanDeviation => {
                if deviation < self.lower_return() {
                    self.buy(reference_close, deviation)
                } else if deviation > self.upper_return() {
                    self.sell(reference_close, deviation)
                } else {
                    Signal::None
                }
            }
            BandStrategy::SymmetricDeviation => {
                if deviation.abs() <= self.threshold() {
                    Signal::None
                } else if price < reference_close {
                    self.buy(reference_close, deviation)
                } else {
                    self.sell(reference_close, deviation)
                }
            }
        }
    }

    fn buy(&self, reference_close: Decimal, deviation: Decimal) -> Signal {
        Signal::Buy {
            trigger_price: self.buy_trigger(reference_close),
            deviation,
        }
    }

    fn sell(&self, reference_close: Decimal, deviation: Decimal) -> Signal {
        Signal::Sell {
            trigger_price: self.sell_trigger(reference_close),
            deviation,
        }
    }
}
