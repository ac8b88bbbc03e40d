//! Band Estimation Errors

use thiserror::Error;

/// Errors that can occur while estimating a band.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BandError {
    /// Not enough usable closes to compute a single daily return.
    #[error("Insufficient history: {usable_points} usable closes, at least 2 required")]
    InsufficientHistory {
        /// Number of positive closes in the series.
        usable_points: usize,
    },

    /// Return statistics exceeded the decimal range.
    #[error("Return statistics overflowed over {observations} daily returns")]
    StatisticsOverflow {
        /// Number of daily returns in the series.
        observations: usize,
    },
}
