//! Observability module for logging, tracing and metrics.

mod metrics;
mod tracing;

pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_crossing, record_notification_failure,
    record_poll, record_quote_failure, record_seed_failure, set_unresolved_tickers,
};
pub use self::tracing::{TracingConfig, TracingError, TracingGuard, default_directive, init_tracing};
