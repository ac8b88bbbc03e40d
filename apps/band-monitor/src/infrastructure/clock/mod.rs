//! Clock Adapters

mod stepping;
mod system;

pub use stepping::SteppingClock;
pub use system::SystemClock;
