//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod symbol;
mod ticker;

pub use symbol::Symbol;
pub use ticker::TickerSpec;
