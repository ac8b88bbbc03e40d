//! Signal Value Object

use rust_decimal::Decimal;
use std::fmt;

/// Side suggested by a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Price fell below the lower edge.
    Buy,
    /// Price rose above the upper edge.
    Sell,
}

impl Direction {
    /// Lowercase label used for metrics and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a live price against a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Price is inside the band.
    None,
    /// Lower edge crossed.
    Buy {
        /// Price at the lower edge.
        trigger_price: Decimal,
        /// Observed `(price - reference) / reference`.
        deviation: Decimal,
    },
    /// Upper edge crossed.
    Sell {
        /// Price at the upper edge.
        trigger_price: Decimal,
        /// Observed `(price - reference) / reference`.
        deviation: Decimal,
    },
}

impl Signal {
    /// Check if the band was crossed.
    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Direction of the crossing, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::None => None,
            Self::Buy { .. } => Some(Direction::Buy),
            Self::Sell { .. } => Some(Direction::Sell),
        }
    }
}
