//! Watch Bounded Context
//!
//! Session state for the monitored tickers: each ticker's band, its
//! reference close and whether it has already produced an alert.

pub mod errors;
pub mod registry;
pub mod ticker_watch;

pub use errors::WatchError;
pub use registry::WatchRegistry;
pub use ticker_watch::TickerWatch;
