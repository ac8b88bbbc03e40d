//! Band Domain Services

mod estimator;

pub use estimator::{BandEstimator, ReturnStats};
