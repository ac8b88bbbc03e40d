//! Band Value Objects

mod band;
mod signal;
mod strategy;

pub use band::Band;
pub use signal::{Direction, Signal};
pub use strategy::BandStrategy;
