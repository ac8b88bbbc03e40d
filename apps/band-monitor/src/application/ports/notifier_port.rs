//! Notifier Port (Driven Port)
//!
//! Interface for delivering plain-text messages to the operator.

use async_trait::async_trait;

/// Notification delivery error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// Message could not reach the provider.
    #[error("Notification delivery failed: {message}")]
    Delivery {
        /// Error details.
        message: String,
    },

    /// Provider refused the message.
    #[error("Notification rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Call exceeded the configured I/O timeout.
    #[error("Notification timed out after {millis}ms")]
    Timeout {
        /// Elapsed budget.
        millis: u64,
    },
}

/// Port for sending notifications.
///
/// Delivery failures are reported to the caller, which logs them and moves on.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Send one message.
    async fn send(&self, text: &str) -> Result<(), NotificationError>;
}
