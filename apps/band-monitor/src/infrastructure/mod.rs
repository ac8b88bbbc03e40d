//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `quote_source/`: Market data (Alpaca REST, scripted mock)
//! - `notifier/`: Message delivery (Telegram, log, recording mock)
//! - `clock/`: Wall clock and a stepping test clock

pub mod clock;
pub mod notifier;
pub mod quote_source;
