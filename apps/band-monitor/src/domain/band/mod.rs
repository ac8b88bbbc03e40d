//! Band Estimation Bounded Context
//!
//! Turns a history of daily closes into a deviation band around the
//! previous session close. A live price outside the band is a crossing.

pub mod errors;
pub mod math;
pub mod services;
pub mod value_objects;

pub use errors::BandError;
pub use services::{BandEstimator, ReturnStats};
pub use value_objects::{Band, BandStrategy, Direction, Signal};
