//! Application Ports (Driven)
//!
//! Ports define interfaces for the external systems the monitor depends on.
//! Adapters live in the infrastructure layer.

mod clock_port;
mod notifier_port;
mod quote_source_port;

pub use clock_port::Clock;
pub use notifier_port::{NotificationError, NotifierPort};
pub use quote_source_port::{QuoteSourceError, QuoteSourcePort};
