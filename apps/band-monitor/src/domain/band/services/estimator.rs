//! Band Estimator
//!
//! Turns a chronological series of daily closes into a deviation band.
//! Pure functions only; fetching the closes is the caller's concern.

use rust_decimal::Decimal;

use crate::domain::band::errors::BandError;
use crate::domain::band::math::{mean, std_dev};
use crate::domain::band::value_objects::{Band, BandStrategy};

/// Summary statistics of a daily return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnStats {
    /// Arithmetic mean of the returns.
    pub mean: Decimal,
    /// Sample standard deviation (zero for a single return).
    pub std_dev: Decimal,
    /// Number of returns.
    pub observations: usize,
}

/// Builds bands from historical closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandEstimator {
    strategy: BandStrategy,
    multiplier: Decimal,
}

impl Default for BandEstimator {
    fn default() -> Self {
        Self::new(BandStrategy::default(), Self::DEFAULT_MULTIPLIER)
    }
}

impl BandEstimator {
    /// Two standard deviations.
    pub const DEFAULT_MULTIPLIER: Decimal = Decimal::TWO;

    /// Create an estimator for a strategy and sigma multiplier.
    #[must_use]
    pub const fn new(strategy: BandStrategy, multiplier: Decimal) -> Self {
        Self {
            strategy,
            multiplier,
        }
    }

    /// Strategy used for new bands.
    #[must_use]
    pub const fn strategy(&self) -> BandStrategy {
        self.strategy
    }

    /// Sigma multiplier used for new bands.
    #[must_use]
    pub const fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    /// Simple daily returns `close_i / close_{i-1} - 1`.
    ///
    /// Non-positive closes are dropped first, so the result has one element
    /// fewer than the number of usable closes.
    #[must_use]
    pub fn daily_returns(closes: &[Decimal]) -> Vec<Decimal> {
        usable_closes(closes)
            .windows(2)
            .filter_map(|pair| pair[1].checked_div(pair[0]))
            .map(|ratio| ratio - Decimal::ONE)
            .collect()
    }

    /// Mean and dispersion of the daily returns.
    pub fn return_stats(closes: &[Decimal]) -> Result<ReturnStats, BandError> {
        let usable_points = usable_closes(closes).len();
        if usable_points < 2 {
            return Err(BandError::InsufficientHistory { usable_points });
        }

        let returns = Self::daily_returns(closes);
        let overflow = || BandError::StatisticsOverflow {
            observations: returns.len(),
        };

        let mean = mean(&returns).ok_or_else(overflow)?;
        let std_dev = if returns.len() < 2 {
            Decimal::ZERO
        } else {
            std_dev(&returns).ok_or_else(overflow)?
        };

        Ok(ReturnStats {
            mean,
            std_dev,
            observations: returns.len(),
        })
    }

    /// Derive a band from historical closes.
    pub fn estimate(&self, closes: &[Decimal]) -> Result<Band, BandError> {
        let stats = Self::return_stats(closes)?;

        let band = match self.strategy {
            BandStrategy::MeanDeviation => {
                Band::mean_deviation(stats.mean, stats.std_dev, self.multiplier)
            }
            BandStrategy::SymmetricDeviation => Band::symmetric(stats.std_dev, self.multiplier),
        };

        tracing::debug!(
            strategy = %self.strategy,
            observations = stats.observations,
            mean = %stats.mean,
            std_dev = %stats.std_dev,
            "Band estimated"
        );

        Ok(band)
    }
}

fn usable_closes(closes: &[Decimal]) -> Vec<Decimal> {
    closes
        .iter()
        .copied()
        .filter(|c| c.is_sign_positive() && !c.is_zero())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn returns_drop_first_undefined_value() {
        let returns = BandEstimator::daily_returns(&[dec!(100), dec!(110), dec!(99)]);
        assert_eq!(returns, vec![dec!(0.1), dec!(-0.1)]);
    }

    #[test]
    fn non_positive_closes_are_dropped() {
        let returns = BandEstimator::daily_returns(&[dec!(100), dec!(0), dec!(-5), dec!(105)]);
        assert_eq!(returns, vec![dec!(0.05)]);
    }

    #[test]
    fn insufficient_history() {
        let err = BandEstimator::default().estimate(&[dec!(100)]).unwrap_err();
        assert_eq!(err, BandError::InsufficientHistory { usable_points: 1 });

        let err = BandEstimator::default().estimate(&[]).unwrap_err();
        assert_eq!(err, BandError::InsufficientHistory { usable_points: 0 });
    }

    #[test]
    fn extreme_history_is_an_error() {
        // A near-zero close turns the next return into ~1e15
        let err = BandEstimator::default()
            .estimate(&[dec!(0.00000000000001), dec!(10), dec!(10)])
            .unwrap_err();
        assert_eq!(err, BandError::StatisticsOverflow { observations: 2 });
    }

    #[test]
    fn single_return_has_zero_dispersion() {
        let stats = BandEstimator::return_stats(&[dec!(100), dec!(101)]).unwrap();
        assert_eq!(stats.observations, 1);
        assert_eq!(stats.mean, dec!(0.01));
        assert_eq!(stats.std_dev, Decimal::ZERO);
    }

    #[test]
    fn stats_use_sample_deviation() {
        // Returns +10%, -10%: mean 0, sample std sqrt(0.02)
        let stats = BandEstimator::return_stats(&[dec!(100), dec!(110), dec!(99)]).unwrap();
        assert_eq!(stats.mean, Decimal::ZERO);
        let diff = (stats.std_dev - dec!(0.1414213562373095)).abs();
        assert!(diff < dec!(0.0000000001), "std_dev = {}", stats.std_dev);
    }

    #[test]
    fn estimate_mean_deviation() {
        let estimator = BandEstimator::default();
        let band = estimator
            .estimate(&[dec!(100), dec!(110), dec!(99)])
            .unwrap();
        assert_eq!(band.strategy(), BandStrategy::MeanDeviation);
        assert!(band.buy_trigger(dec!(100)) < dec!(100));
        assert!(band.sell_trigger(dec!(100)) > dec!(100));
    }

    #[test]
    fn estimate_symmetric_deviation() {
        let estimator = BandEstimator::new(BandStrategy::SymmetricDeviation, dec!(2));
        // Returns +1%, +3%: mean 2%, ignored by the symmetric band
        let band = estimator
            .estimate(&[dec!(100), dec!(101), dec!(104.03)])
            .unwrap();
        assert_eq!(band.mean(), Decimal::ZERO);
        let above = band.sell_trigger(dec!(100)) - dec!(100);
        let below = dec!(100) - band.buy_trigger(dec!(100));
        assert!((above - below).abs() < dec!(0.000000000001));
    }

    #[test]
    fn default_multiplier_is_two() {
        assert_eq!(BandEstimator::default().multiplier(), dec!(2));
    }

    proptest! {
        #[test]
        fn returns_length_is_closes_minus_one(
            closes in prop::collection::vec(1u32..100_000, 2..64)
        ) {
            let closes: Vec<Decimal> = closes.into_iter().map(Decimal::from).collect();
            let returns = BandEstimator::daily_returns(&closes);
            prop_assert_eq!(returns.len(), closes.len() - 1);
        }

        #[test]
        fn band_brackets_reference(
            closes in prop::collection::vec(1u32..100_000, 3..64),
            reference in 1u32..10_000
        ) {
            let closes: Vec<Decimal> = closes.into_iter().map(Decimal::from).collect();
            let reference = Decimal::from(reference);
            let band = BandEstimator::new(BandStrategy::SymmetricDeviation, dec!(2))
                .estimate(&closes)
                .unwrap();
            prop_assert!(band.buy_trigger(reference) <= reference);
            prop_assert!(band.sell_trigger(reference) >= reference);
        }
    }
}
