//! Band Monitor Binary
//!
//! Runs one monitoring session and exits.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin band-monitor -- config.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `BAND_MONITOR_CONFIG`: Config path when no argument is given (default: config.yaml)
//! - `RUST_LOG`: Log filter (default: band_monitor=info)
//!
//! Credentials are usually referenced from the config file as `${VAR}` and
//! may live in a `.env` file in the working directory or any ancestor.
//!
//! # Exit Codes
//!
//! - `0`: The session ended normally (including weekend, holiday and off-hours starts)
//! - `1`: Configuration or startup failure

use std::process::ExitCode;
use std::sync::Arc;

use band_monitor::application::ports::{NotifierPort, QuoteSourcePort};
use band_monitor::application::services::{MonitorLoop, SessionOutcome};
use band_monitor::config::{Config, NotifierKind, load_config, resolve_config_path};
use band_monitor::domain::session::SessionClock;
use band_monitor::infrastructure::clock::SystemClock;
use band_monitor::infrastructure::notifier::{LogNotifier, TelegramNotifier};
use band_monitor::infrastructure::quote_source::AlpacaQuoteSource;
use band_monitor::observability::{MetricsConfig, TracingConfig, init_metrics, init_tracing};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    load_dotenv();

    let path = resolve_config_path(std::env::args().nth(1));
    let config = match load_config(Some(&path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("band-monitor: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("band-monitor: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<SessionOutcome> {
    let otlp = config
        .observability
        .otlp_endpoint
        .as_deref()
        .filter(|endpoint| !endpoint.is_empty())
        .map(TracingConfig::with_endpoint);
    let guard = init_tracing(&config.observability.logging, otlp.as_ref())?;

    guard.flush_after(start_session(&config)).await
}

async fn start_session(config: &Config) -> anyhow::Result<SessionOutcome> {
    if config.observability.metrics_port != 0 {
        init_metrics(&MetricsConfig::with_port(config.observability.metrics_port))?;
    }

    let session = config.session.to_session_clock()?;
    let quotes = Arc::new(AlpacaQuoteSource::new(
        &config.quote_source.to_alpaca_config(),
    )?);

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let outcome = match config.notifier.kind {
        NotifierKind::Telegram => {
            let notifier = Arc::new(TelegramNotifier::new(
                &config.notifier.telegram.to_telegram_config(),
            )?);
            run_session(config, session, quotes, notifier, shutdown).await
        }
        NotifierKind::Log => {
            run_session(config, session, quotes, Arc::new(LogNotifier::new()), shutdown).await
        }
    };

    Ok(outcome)
}

async fn run_session<Q, N>(
    config: &Config,
    session: SessionClock,
    quotes: Arc<Q>,
    notifier: Arc<N>,
    shutdown: CancellationToken,
) -> SessionOutcome
where
    Q: QuoteSourcePort,
    N: NotifierPort,
{
    let mut monitor = MonitorLoop::new(
        config.monitor_settings(),
        session,
        quotes,
        notifier,
        Arc::new(SystemClock),
        shutdown,
    );
    monitor.run().await
}

/// Load .env file from current directory or any ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Cancel the session on Ctrl+C or SIGTERM.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping session");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping session");
        }
    }

    token.cancel();
}
