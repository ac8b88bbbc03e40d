//! Application Layer
//!
//! Orchestrates the domain through ports:
//!
//! - **Ports**: Interfaces for quotes, notifications and the wall clock
//! - **Services**: The monitoring session state machine

pub mod ports;
pub mod services;

pub use ports::*;
pub use services::*;
