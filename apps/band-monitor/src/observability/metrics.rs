//! Prometheus metrics for the band monitor.
//!
//! Counters are recorded unconditionally; they are only exported when
//! [`init_metrics`] installs the Prometheus recorder.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::with_port(9090)
    }
}

impl MetricsConfig {
    /// Listen on all interfaces at `port`.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Session Metrics
// ============================================================================

/// Record a completed polling cycle.
pub fn record_poll() {
    counter!("band_monitor_polls_total").increment(1);
}

/// Record a band crossing.
///
/// # Arguments
///
/// * `direction` - "buy" or "sell"
pub fn record_crossing(direction: &str) {
    counter!(
        "band_monitor_crossings_total",
        "direction" => direction.to_string()
    )
    .increment(1);
}

/// Record a failed quote request.
///
/// # Arguments
///
/// * `kind` - Error kind (e.g., "transport", "timeout", "data_unavailable")
pub fn record_quote_failure(kind: &str) {
    counter!(
        "band_monitor_quote_failures_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record a notification that could not be delivered.
pub fn record_notification_failure() {
    counter!("band_monitor_notification_failures_total").increment(1);
}

/// Record a ticker excluded at seeding.
pub fn record_seed_failure() {
    counter!("band_monitor_seed_failures_total").increment(1);
}

/// Update the number of tickers still waiting for a crossing.
pub fn set_unresolved_tickers(count: usize) {
    gauge!("band_monitor_unresolved_tickers").set(count as f64);
}
