//! Logging and OpenTelemetry tracing for the band monitor.
//!
//! Always installs a `tracing-subscriber` fmt layer (text or JSON) behind an
//! `EnvFilter`. When an OTLP endpoint is configured, spans are also exported
//! over gRPC.
//!
//! # Example
//!
//! ```ignore
//! use band_monitor::observability::{init_tracing, TracingConfig};
//!
//! let guard = init_tracing(&logging, Some(&TracingConfig::with_endpoint("http://otel:4317")))?;
//! // ...
//! guard.shutdown();
//! ```

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchSpanProcessor, SdkTracerProvider};
use std::future::Future;
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Configuration for OpenTelemetry span export.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP endpoint URL (e.g., "http://localhost:4317").
    pub otlp_endpoint: String,
    /// Service name for resource attributes.
    pub service_name: String,
    /// Service version for resource attributes.
    pub service_version: String,
    /// Maximum batch size for span export.
    pub batch_size: usize,
    /// Scheduled delay between batch exports.
    pub batch_timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: "band-monitor".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            batch_size: 512,
            batch_timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    /// Create a new tracing configuration with a custom endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            otlp_endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the service name.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }
}

/// Error type for tracing operations.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// Failed to create OTLP exporter.
    #[error("failed to create OTLP exporter: {0}")]
    ExporterError(String),
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Tracer provider handle for graceful shutdown.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Whether spans are being exported.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Run `work`, then shut down whether it succeeded or not.
    ///
    /// A failure is logged before the flush so it reaches the exporter.
    pub async fn flush_after<T, E, F>(self, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let result = work.await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Session aborted");
        }
        self.shutdown();
        result
    }

    /// Shutdown the tracer provider, flushing any pending spans.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            tracing::error!(error = %e, "Failed to shutdown tracer provider");
        }
    }
}

/// Default filter when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("band_monitor={level}")
}

fn build_provider(config: &TracingConfig) -> Result<SdkTracerProvider, TracingError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
        .map_err(|e| TracingError::ExporterError(e.to_string()))?;

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", config.service_name.clone()),
            KeyValue::new("service.version", config.service_version.clone()),
        ])
        .build();

    let batch_processor = BatchSpanProcessor::builder(exporter)
        .with_batch_config(
            opentelemetry_sdk::trace::BatchConfigBuilder::default()
                .with_max_export_batch_size(config.batch_size)
                .with_scheduled_delay(config.batch_timeout)
                .build(),
        )
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_span_processor(batch_processor)
        .build())
}

/// Initialize logging, plus OTLP export when `otlp` is given.
///
/// # Returns
///
/// A `TracingGuard` that should be held until shutdown.
pub fn init_tracing(
    logging: &LoggingConfig,
    otlp: Option<&TracingConfig>,
) -> Result<TracingGuard, TracingError> {
    let provider = otlp.map(build_provider).transpose()?;

    let otel_layer = match (&provider, otlp) {
        (Some(provider), Some(config)) => Some(OpenTelemetryLayer::new(
            provider.tracer(config.service_name.clone()),
        )),
        _ => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&logging.level)));

    let (text_layer, json_layer) = match logging.format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| TracingError::SubscriberError(e.to_string()))?;

    if let Some(config) = otlp {
        tracing::info!(
            endpoint = %config.otlp_endpoint,
            service = %config.service_name,
            "OpenTelemetry tracing initialized"
        );
    }

    Ok(TracingGuard { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.otlp_endpoint, "http://localhost:4317");
        assert_eq!(config.service_name, "band-monitor");
        assert_eq!(config.batch_size, 512);
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::with_endpoint("http://custom:4317").service_name("alerts");

        assert_eq!(config.otlp_endpoint, "http://custom:4317");
        assert_eq!(config.service_name, "alerts");
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "band_monitor=debug");
    }

    #[tokio::test]
    async fn test_failed_work_still_shuts_down_provider() {
        let provider = SdkTracerProvider::builder().build();
        let guard = TracingGuard {
            provider: Some(provider.clone()),
        };
        assert!(guard.is_exporting());

        let result: Result<(), String> = guard
            .flush_after(async { Err("invalid session hours".to_string()) })
            .await;

        assert_eq!(result, Err("invalid session hours".to_string()));
        // Already shut down by the guard
        assert!(provider.shutdown().is_err());
    }

    #[tokio::test]
    async fn test_successful_work_passes_through() {
        let guard = TracingGuard { provider: None };
        let result: Result<u32, String> = guard.flush_after(async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_tracing_error_display() {
        let err = TracingError::ExporterError("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
