//! Domain Layer
//!
//! The innermost layer containing the alerting rules with zero
//! infrastructure dependencies. Quote fetching, notification delivery and
//! the wall clock are reached only through application ports.
//!
//! # Bounded Contexts
//!
//! - [`band`]: Daily-return statistics and the deviation band
//! - [`session`]: Exchange calendar and session hours
//! - [`watch`]: Per-session ticker state and one-shot resolution
//! - [`shared`]: Symbols, ticker specs and shared errors

pub mod band;
pub mod session;
pub mod shared;
pub mod watch;
