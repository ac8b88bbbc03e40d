//! Monitor Loop
//!
//! One trading session: check the calendar, seed a band per ticker, poll
//! live prices until every ticker has crossed its band or the session ends.
//!
//! ```text
//! PRECHECK -> SEEDING -> POLLING -> DONE
//!    |           |          |
//!    +-----------+----------+--> DONE (weekend, holiday, closed, ...)
//! ```
//!
//! Per-ticker faults are reported and contained; they never end the session.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::messages;
use crate::application::ports::{
    Clock, NotificationError, NotifierPort, QuoteSourceError, QuoteSourcePort,
};
use crate::domain::band::{BandError, BandEstimator, BandStrategy, Direction, Signal};
use crate::domain::session::SessionClock;
use crate::domain::shared::{Symbol, TickerSpec};
use crate::domain::watch::{WatchError, WatchRegistry};
use crate::observability;

/// Settings consumed by the monitor loop.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Tickers in notification order.
    pub tickers: Vec<TickerSpec>,
    /// Sleep between polling cycles.
    pub poll_interval: Duration,
    /// Calendar days of history used for the band.
    pub lookback_days: u32,
    /// Band placement.
    pub strategy: BandStrategy,
    /// Sigma multiplier.
    pub multiplier: Decimal,
    /// Refuse to start outside session hours.
    pub enforce_open_hours_precheck: bool,
    /// Budget for each quote or notification call.
    pub io_timeout: Option<Duration>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            poll_interval: Duration::from_secs(300),
            lookback_days: 1250,
            strategy: BandStrategy::MeanDeviation,
            multiplier: BandEstimator::DEFAULT_MULTIPLIER,
            enforce_open_hours_precheck: true,
            io_timeout: None,
        }
    }
}

/// Why a session reached DONE. Every reason is a normal termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Started on a Saturday or Sunday.
    Weekend,
    /// Started on a configured market holiday.
    Holiday,
    /// Started before open or after close.
    OutsideSessionHours,
    /// Polling reached the session close.
    SessionClosed,
    /// Every seeded ticker produced an alert.
    AllResolved,
    /// Seeding failed for every ticker.
    NoTickersSeeded,
    /// Operator asked the process to stop.
    Cancelled,
}

impl TerminationReason {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekend => "weekend",
            Self::Holiday => "holiday",
            Self::OutsideSessionHours => "outside_session_hours",
            Self::SessionClosed => "session_closed",
            Self::AllResolved => "all_resolved",
            Self::NoTickersSeeded => "no_tickers_seeded",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Calendar and hours checks.
    Precheck,
    /// Building one watch per ticker.
    Seeding,
    /// Sampling live prices.
    Polling,
    /// Terminal.
    Done(TerminationReason),
}

/// A ticker that could not be seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    /// The ticker.
    pub ticker: TickerSpec,
    /// Rendered error.
    pub reason: String,
}

/// Errors that exclude a ticker from the session.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Quote source failed.
    #[error(transparent)]
    Quote(#[from] QuoteSourceError),
    /// Not enough history for a band.
    #[error(transparent)]
    Band(#[from] BandError),
    /// Registry refused the watch.
    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// A crossing that produced an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingAlert {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Buy or sell.
    pub direction: Direction,
    /// Live price that crossed.
    pub price: Decimal,
    /// Price at the crossed edge.
    pub trigger_price: Decimal,
    /// Observed move from the reference close.
    pub deviation: Decimal,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Why the session ended.
    pub reason: TerminationReason,
    /// Tickers with a band.
    pub seeded: usize,
    /// Tickers excluded at seeding.
    pub seed_failures: Vec<SeedFailure>,
    /// Alerts in the order they fired.
    pub alerts: Vec<CrossingAlert>,
    /// Completed polling cycles.
    pub polls: u32,
}

/// Drives a single monitoring session.
pub struct MonitorLoop<Q, N, C>
where
    Q: QuoteSourcePort,
    N: NotifierPort,
    C: Clock,
{
    settings: MonitorSettings,
    session: SessionClock,
    estimator: BandEstimator,
    quotes: Arc<Q>,
    notifier: Arc<N>,
    clock: Arc<C>,
    registry: WatchRegistry,
    shutdown: CancellationToken,
    state: MonitorState,
    seed_failures: Vec<SeedFailure>,
    alerts: Vec<CrossingAlert>,
    polls: u32,
}

impl<Q, N, C> MonitorLoop<Q, N, C>
where
    Q: QuoteSourcePort,
    N: NotifierPort,
    C: Clock,
{
    /// Create a loop in the PRECHECK state.
    #[must_use]
    pub fn new(
        settings: MonitorSettings,
        session: SessionClock,
        quotes: Arc<Q>,
        notifier: Arc<N>,
        clock: Arc<C>,
        shutdown: CancellationToken,
    ) -> Self {
        let estimator = BandEstimator::new(settings.strategy, settings.multiplier);

        Self {
            settings,
            session,
            estimator,
            quotes,
            notifier,
            clock,
            registry: WatchRegistry::new(),
            shutdown,
            state: MonitorState::Precheck,
            seed_failures: Vec::new(),
            alerts: Vec::new(),
            polls: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> MonitorState {
        self.state
    }

    /// Session registry.
    #[must_use]
    pub const fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    /// Run the session to DONE.
    pub async fn run(&mut self) -> SessionOutcome {
        let started_at = self.clock.now();
        let session_date = self.session.local_date(started_at);

        tracing::info!(
            tickers = self.settings.tickers.len(),
            strategy = %self.settings.strategy,
            multiplier = %self.settings.multiplier,
            poll_interval_secs = self.settings.poll_interval.as_secs(),
            %session_date,
            "Starting monitoring session"
        );

        let reason = loop {
            let next = match self.state {
                MonitorState::Precheck => self.precheck(started_at).await,
                MonitorState::Seeding => self.seed().await,
                MonitorState::Polling => self.poll_cycle(session_date).await,
                MonitorState::Done(reason) => break reason,
            };
            tracing::debug!(from = ?self.state, to = ?next, "State transition");
            self.state = next;
        };

        tracing::info!(
            reason = reason.as_str(),
            alerts = self.alerts.len(),
            polls = self.polls,
            "Monitoring session finished"
        );

        SessionOutcome {
            reason,
            seeded: self.registry.len(),
            seed_failures: self.seed_failures.clone(),
            alerts: self.alerts.clone(),
            polls: self.polls,
        }
    }

    async fn precheck(&self, now: DateTime<Utc>) -> MonitorState {
        let reason = if self.session.is_weekend(now) {
            Some(TerminationReason::Weekend)
        } else if self.session.is_holiday(now) {
            Some(TerminationReason::Holiday)
        } else if self.settings.enforce_open_hours_precheck && !self.session.in_session(now) {
            Some(TerminationReason::OutsideSessionHours)
        } else {
            None
        };

        match reason {
            Some(reason) => self.finish(reason).await,
            None => MonitorState::Seeding,
        }
    }

    async fn seed(&mut self) -> MonitorState {
        let tickers = self.settings.tickers.clone();

        for ticker in tickers {
            match self.seed_ticker(&ticker).await {
                Ok(()) => {
                    if let Some(watch) = self.registry.get(&ticker.symbol) {
                        tracing::info!(
                            symbol = %ticker.symbol,
                            reference_close = %watch.reference_close(),
                            buy_trigger = %watch.buy_trigger(),
                            sell_trigger = %watch.sell_trigger(),
                            "Ticker seeded"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(symbol = %ticker.symbol, error = %e, "Ticker seeding failed");
                    observability::record_seed_failure();
                    self.seed_failures.push(SeedFailure {
                        reason: e.to_string(),
                        ticker,
                    });
                }
            }
        }

        let summary = messages::session_summary(self.registry.iter(), &self.seed_failures);
        self.notify(&summary).await;
        observability::set_unresolved_tickers(self.registry.len());

        if self.registry.is_empty() {
            return self.finish(TerminationReason::NoTickersSeeded).await;
        }
        MonitorState::Polling
    }

    async fn seed_ticker(&mut self, ticker: &TickerSpec) -> Result<(), SeedError> {
        let closes = self
            .quote(
                self.quotes
                    .historical_daily_closes(&ticker.symbol, self.settings.lookback_days),
            )
            .await?;
        let band = self.estimator.estimate(&closes)?;
        let reference_close = self
            .quote(self.quotes.previous_session_close(&ticker.symbol))
            .await?;

        self.registry
            .seed(ticker.clone(), band, reference_close)?;
        Ok(())
    }

    async fn poll_cycle(&mut self, session_date: NaiveDate) -> MonitorState {
        if self.shutdown.is_cancelled() {
            return self.finish(TerminationReason::Cancelled).await;
        }

        let now = self.clock.now();
        if self.session.has_ended(now, session_date) {
            return self.finish(TerminationReason::SessionClosed).await;
        }

        self.polls += 1;
        observability::record_poll();
        tracing::debug!(poll = self.polls, "Polling cycle");

        for symbol in self.registry.unresolved_symbols() {
            self.check_ticker(&symbol).await;

            if self.registry.all_resolved() {
                observability::set_unresolved_tickers(0);
                return self.finish(TerminationReason::AllResolved).await;
            }
        }
        observability::set_unresolved_tickers(self.registry.unresolved_symbols().len());

        tokio::select! {
            () = tokio::time::sleep(self.settings.poll_interval) => MonitorState::Polling,
            () = self.shutdown.cancelled() => self.finish(TerminationReason::Cancelled).await,
        }
    }

    async fn check_ticker(&mut self, symbol: &Symbol) {
        let price = match self.quote(self.quotes.latest_intraday_price(symbol)).await {
            Ok(price) => price,
            Err(e) if !e.is_fault() => {
                tracing::info!(%symbol, error = %e, "No intraday price yet");
                observability::record_quote_failure(e.kind());
                return;
            }
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "Intraday price fetch failed");
                observability::record_quote_failure(e.kind());
                if let Some(watch) = self.registry.get(symbol) {
                    let text = messages::ticker_error(watch.spec(), &e);
                    self.notify(&text).await;
                }
                return;
            }
        };

        let Some(watch) = self.registry.get(symbol) else {
            return;
        };

        let (direction, trigger_price, deviation) = match watch.classify(price) {
            Signal::None => {
                tracing::debug!(%symbol, %price, "Inside band");
                return;
            }
            Signal::Buy {
                trigger_price,
                deviation,
            } => (Direction::Buy, trigger_price, deviation),
            Signal::Sell {
                trigger_price,
                deviation,
            } => (Direction::Sell, trigger_price, deviation),
        };

        let text = messages::crossing_alert(watch, direction, price, deviation);
        tracing::info!(
            %symbol,
            direction = direction.as_str(),
            %price,
            %trigger_price,
            %deviation,
            "Band crossed"
        );
        self.notify(&text).await;

        if let Ok(true) = self.registry.mark_resolved(symbol) {
            observability::record_crossing(direction.as_str());
            self.alerts.push(CrossingAlert {
                symbol: symbol.clone(),
                direction,
                price,
                trigger_price,
                deviation,
            });
        }
    }

    async fn finish(&self, reason: TerminationReason) -> MonitorState {
        tracing::info!(reason = reason.as_str(), "Monitoring done");
        self.notify(&messages::termination_notice(reason)).await;
        MonitorState::Done(reason)
    }

    async fn quote<T>(
        &self,
        call: impl Future<Output = Result<T, QuoteSourceError>>,
    ) -> Result<T, QuoteSourceError> {
        match self.settings.io_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| QuoteSourceError::Timeout {
                    millis: limit.as_millis() as u64,
                })?,
            None => call.await,
        }
    }

    async fn notify(&self, text: &str) {
        let result = match self.settings.io_timeout {
            Some(limit) => tokio::time::timeout(limit, self.notifier.send(text))
                .await
                .unwrap_or(Err(NotificationError::Timeout {
                    millis: limit.as_millis() as u64,
                })),
            None => self.notifier.send(text).await,
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Notification delivery failed");
            observability::record_notification_failure();
        }
    }
}
