//! Trading Session Bounded Context
//!
//! Calendar and clock-time rules for a single exchange session in a named
//! timezone. Every check is a pure function of the `now` it is given.

pub mod calendar;
pub mod errors;

pub use calendar::SessionClock;
pub use errors::SessionError;
