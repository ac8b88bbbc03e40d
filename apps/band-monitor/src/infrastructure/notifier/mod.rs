//! Notifier Adapters
//!
//! Implementations of `NotifierPort`.

pub mod log;
pub mod mock;
pub mod telegram;

pub use log::LogNotifier;
pub use mock::RecordingNotifier;
pub use telegram::{TelegramConfig, TelegramNotifier};
