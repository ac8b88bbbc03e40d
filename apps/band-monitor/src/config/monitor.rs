//! Monitor loop configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::band::{BandEstimator, BandStrategy};

/// Polling and band parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between polling cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Calendar days of daily history used for the band.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Band placement.
    #[serde(default)]
    pub strategy: BandStrategy,
    /// Band half-width in standard deviations.
    #[serde(default = "default_sigma_multiplier")]
    pub sigma_multiplier: Decimal,
    /// Refuse to start outside session hours.
    #[serde(default = "default_true")]
    pub enforce_open_hours_precheck: bool,
    /// Budget for each quote or notification call, in milliseconds.
    #[serde(default)]
    pub io_timeout_ms: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            lookback_days: default_lookback_days(),
            strategy: BandStrategy::default(),
            sigma_multiplier: default_sigma_multiplier(),
            enforce_open_hours_precheck: true,
            io_timeout_ms: None,
        }
    }
}

const fn default_poll_interval_secs() -> u64 {
    300
}

const fn default_lookback_days() -> u32 {
    1250
}

const fn default_sigma_multiplier() -> Decimal {
    BandEstimator::DEFAULT_MULTIPLIER
}

pub(super) const fn default_true() -> bool {
    true
}
