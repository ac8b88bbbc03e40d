//! Application Services
//!
//! The monitoring session and the text of the notifications it sends.

pub mod messages;
mod monitor_loop;

pub use monitor_loop::{
    CrossingAlert, MonitorLoop, MonitorSettings, MonitorState, SeedError, SeedFailure,
    SessionOutcome, TerminationReason,
};
