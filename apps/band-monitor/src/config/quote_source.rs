//! Quote source configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::quote_source::AlpacaQuoteConfig;
use crate::infrastructure::quote_source::alpaca::DEFAULT_DATA_URL;

/// Alpaca Market Data credentials and endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuoteSourceConfig {
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret.
    #[serde(default)]
    pub api_secret: String,
    /// Market data base URL.
    #[serde(default = "default_data_url")]
    pub data_url: String,
    /// Data feed (`iex` or `sip`).
    #[serde(default = "default_feed")]
    pub feed: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for QuoteSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSourceConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for QuoteSourceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            data_url: default_data_url(),
            feed: default_feed(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl QuoteSourceConfig {
    /// Adapter configuration.
    #[must_use]
    pub fn to_alpaca_config(&self) -> AlpacaQuoteConfig {
        AlpacaQuoteConfig::new(self.api_key.clone(), self.api_secret.clone())
            .with_data_url(self.data_url.clone())
            .with_feed(self.feed.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

fn default_feed() -> String {
    "iex".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}
