//! Recording notifier for testing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::ports::{NotificationError, NotifierPort};

/// Captures every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make later sends fail. Failed messages are still recorded.
    pub fn fail_deliveries(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages in send order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl NotifierPort for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        self.messages.lock().push(text.to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery {
                message: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}
