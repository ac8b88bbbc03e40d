//! Configuration module for the band monitor.
//!
//! Loads a YAML file, interpolates environment variables and validates the
//! result before anything else starts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use band_monitor::config::{load_config, resolve_config_path};
//!
//! let path = resolve_config_path(std::env::args().nth(1));
//! let config = load_config(Some(&path))?;
//!
//! let settings = config.monitor_settings();
//! let session = config.session.to_session_clock()?;
//! ```

mod monitor;
mod notifier;
mod observability;
mod quote_source;
mod session;

use std::collections::HashSet;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use monitor::MonitorConfig;
pub use notifier::{NotifierConfig, NotifierKind, TelegramSection};
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use quote_source::QuoteSourceConfig;
pub use session::SessionConfig;

use crate::application::services::MonitorSettings;
use crate::domain::shared::TickerSpec;

/// Environment variable holding the config path.
pub const CONFIG_PATH_ENV: &str = "BAND_MONITOR_CONFIG";

/// Config path used when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tickers in notification order.
    pub tickers: Vec<TickerSpec>,
    /// Polling and band parameters.
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Exchange calendar and hours.
    #[serde(default)]
    pub session: SessionConfig,
    /// Market data credentials.
    #[serde(default)]
    pub quote_source: QuoteSourceConfig,
    /// Notification delivery.
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Logging, tracing and metrics.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Settings for the monitor loop.
    #[must_use]
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            tickers: self.tickers.clone(),
            poll_interval: Duration::from_secs(self.monitor.poll_interval_secs),
            lookback_days: self.monitor.lookback_days,
            strategy: self.monitor.strategy,
            multiplier: self.monitor.sigma_multiplier,
            enforce_open_hours_precheck: self.monitor.enforce_open_hours_precheck,
            io_timeout: self
                .monitor
                .io_timeout_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis),
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Pick the config path: explicit argument, then `BAND_MONITOR_CONFIG`,
/// then `config.yaml`.
#[must_use]
pub fn resolve_config_path(cli_arg: Option<String>) -> String {
    cli_arg
        .filter(|p| !p.is_empty())
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()))
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tickers.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one ticker is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for ticker in &config.tickers {
        ticker
            .symbol
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        if !seen.insert(&ticker.symbol) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate ticker symbol: {}",
                ticker.symbol
            )));
        }
    }

    let monitor = &config.monitor;
    if monitor.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "monitor.poll_interval_secs must be positive".to_string(),
        ));
    }

    if monitor.lookback_days < 2 {
        return Err(ConfigError::ValidationError(
            "monitor.lookback_days must be at least 2".to_string(),
        ));
    }

    if monitor.sigma_multiplier <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "monitor.sigma_multiplier must be positive".to_string(),
        ));
    }

    config.session.to_session_clock()?;

    if config.quote_source.api_key.is_empty() || config.quote_source.api_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "quote_source.api_key and quote_source.api_secret are required".to_string(),
        ));
    }

    if config.notifier.kind == NotifierKind::Telegram {
        let telegram = &config.notifier.telegram;
        if telegram.bot_token.is_empty() || telegram.chat_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "notifier.telegram.bot_token and notifier.telegram.chat_id are required"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::band::BandStrategy;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const MINIMAL: &str = r#"
tickers:
  - symbol: VRT
    display_name: Vertiv
  - symbol: soxl
quote_source:
  api_key: key
  api_secret: secret
notifier:
  kind: log
"#;

    fn expect_validation_error(yaml: &str, needle: &str) {
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected validation error containing '{needle}'");
        };
        assert!(
            err.to_string().contains(needle),
            "'{err}' does not contain '{needle}'"
        );
    }

    #[test]
    fn test_load_minimal_config() {
        let config = match load_config_from_string(MINIMAL) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };

        assert_eq!(config.tickers.len(), 2);
        assert_eq!(config.tickers[1].symbol.as_str(), "SOXL");
        assert_eq!(config.monitor.poll_interval_secs, 300);
        assert_eq!(config.monitor.lookback_days, 1250);
        assert_eq!(config.monitor.strategy, BandStrategy::MeanDeviation);
        assert_eq!(config.monitor.sigma_multiplier, dec!(2));
        assert!(config.monitor.enforce_open_hours_precheck);
        assert_eq!(config.session.timezone, "America/New_York");
        assert_eq!(config.observability.metrics_port, 0);
    }

    #[test]
    fn test_monitor_settings_conversion() {
        let yaml = format!(
            "{MINIMAL}monitor:\n  poll_interval_secs: 60\n  strategy: symmetric_deviation\n  sigma_multiplier: 2.5\n  io_timeout_ms: 1500\n  enforce_open_hours_precheck: false\n"
        );
        let config = load_config_from_string(&yaml).unwrap();
        let settings = config.monitor_settings();

        assert_eq!(settings.poll_interval, Duration::from_secs(60));
        assert_eq!(settings.strategy, BandStrategy::SymmetricDeviation);
        assert_eq!(settings.multiplier, dec!(2.5));
        assert_eq!(settings.io_timeout, Some(Duration::from_millis(1500)));
        assert!(!settings.enforce_open_hours_precheck);
        assert_eq!(settings.tickers[0].label(), "Vertiv (VRT)");
    }

    #[test]
    fn test_session_with_holidays() {
        let yaml = format!(
            "{MINIMAL}session:\n  timezone: America/New_York\n  open: \"09:30\"\n  close: \"16:00\"\n  holidays:\n    - 2024-07-04\n"
        );
        let config = load_config_from_string(&yaml).unwrap();
        assert_eq!(config.session.holidays.len(), 1);
        assert!(config.session.to_session_clock().is_ok());
    }

    #[test]
    fn test_validation_no_tickers() {
        expect_validation_error(
            "tickers: []\nquote_source:\n  api_key: k\n  api_secret: s\n",
            "at least one ticker",
        );
    }

    #[test]
    fn test_validation_duplicate_symbols() {
        let yaml = MINIMAL.replace("symbol: soxl", "symbol: vrt");
        expect_validation_error(&yaml, "duplicate ticker symbol: VRT");
    }

    #[test]
    fn test_validation_invalid_symbol() {
        let yaml = MINIMAL.replace("symbol: soxl", "symbol: \"SO XL\"");
        expect_validation_error(&yaml, "invalid characters");
    }

    #[test]
    fn test_validation_zero_poll_interval() {
        let yaml = format!("{MINIMAL}monitor:\n  poll_interval_secs: 0\n");
        expect_validation_error(&yaml, "poll_interval_secs");
    }

    #[test]
    fn test_validation_short_lookback() {
        let yaml = format!("{MINIMAL}monitor:\n  lookback_days: 1\n");
        expect_validation_error(&yaml, "lookback_days");
    }

    #[test]
    fn test_validation_non_positive_multiplier() {
        let yaml = format!("{MINIMAL}monitor:\n  sigma_multiplier: 0\n");
        expect_validation_error(&yaml, "sigma_multiplier");
    }

    #[test]
    fn test_validation_bad_timezone() {
        let yaml = format!("{MINIMAL}session:\n  timezone: Nowhere/Land\n");
        expect_validation_error(&yaml, "Unknown timezone");
    }

    #[test]
    fn test_validation_bad_hours() {
        let yaml = format!("{MINIMAL}session:\n  open: \"9am\"\n");
        expect_validation_error(&yaml, "session.open must be HH:MM");

        let yaml = format!("{MINIMAL}session:\n  open: \"16:00\"\n  close: \"09:30\"\n");
        expect_validation_error(&yaml, "must be before close");
    }

    #[test]
    fn test_validation_missing_telegram_credentials() {
        let yaml = MINIMAL.replace("kind: log", "kind: telegram");
        expect_validation_error(&yaml, "bot_token");
    }

    #[test]
    fn test_validation_missing_quote_credentials() {
        let yaml = MINIMAL.replace("api_key: key", "api_key: \"\"");
        expect_validation_error(&yaml, "quote_source.api_key");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "feed: ${BAND_MONITOR_TEST_NONEXISTENT_VAR:-iex}";
        assert_eq!(interpolate_env_vars(input), "feed: iex");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let result = interpolate_env_vars("path: ${PATH:-default}");
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "api_key: ${BAND_MONITOR_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "api_key: ");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let path = file.path().to_str().unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.tickers[0].symbol.as_str(), "VRT");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some("/nonexistent/band-monitor.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let yaml = MINIMAL
            .replace("api_secret: secret", "api_secret: alpaca-secret-456")
            .replace(
                "kind: log",
                "kind: telegram\n  telegram:\n    bot_token: \"123:bot-secret\"\n    chat_id: \"42\"",
            );
        let config = load_config_from_string(&yaml).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("alpaca-secret-456"), "{debug}");
        assert!(!debug.contains("bot-secret"), "{debug}");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_cli_argument_wins() {
        assert_eq!(
            resolve_config_path(Some("custom.yaml".to_string())),
            "custom.yaml"
        );
    }
}
