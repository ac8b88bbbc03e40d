// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Band Monitor - Rust Core Library
//!
//! Intraday deviation alerts for a fixed list of equity tickers.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure rules with no I/O
//!   - `band`: Daily returns, dispersion, band and crossing classification
//!   - `session`: Weekend, holiday and session-hours checks in the exchange timezone
//!   - `watch`: Per-ticker reference close and one-shot resolution
//!
//! - **Application**: Ports and orchestration
//!   - `ports`: `QuoteSourcePort`, `NotifierPort`, `Clock`
//!   - `services`: The `MonitorLoop` state machine and notification text
//!
//! - **Infrastructure**: Adapters
//!   - `quote_source`: Alpaca Market Data REST, scripted mock
//!   - `notifier`: Telegram Bot API, log-only, recording mock
//!   - `clock`: System clock, stepping test clock
//!
//! Cross-cutting: `config` (YAML + env interpolation) and `observability`
//! (tracing, OpenTelemetry, Prometheus).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Port definitions and the monitoring session.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Logging, tracing and metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::services::{
    MonitorLoop, MonitorSettings, SessionOutcome, TerminationReason,
};
pub use domain::band::{Band, BandEstimator, BandStrategy, Direction, Signal};
pub use domain::session::SessionClock;
pub use domain::shared::{Symbol, TickerSpec};
pub use domain::watch::{TickerWatch, WatchRegistry};
