//! Band Strategy Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the band is placed around the reference close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandStrategy {
    /// `mean ± k·σ` of daily returns; asymmetric when the mean drifts.
    #[default]
    MeanDeviation,
    /// `± k·σ` with the mean assumed to be zero.
    SymmetricDeviation,
}

impl BandStrategy {
    /// Stable name used in configuration and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MeanDeviation => "mean_deviation",
            Self::SymmetricDeviation => "symmetric_deviation",
        }
    }
}

impl fmt::Display for BandStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
