//! Notifier that only writes to the log, for dry runs.

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotifierPort};

/// Logs every message at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new log notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifierPort for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        tracing::info!(text = %text, "Notification");
        Ok(())
    }
}
