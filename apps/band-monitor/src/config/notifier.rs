//! Notifier configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::notifier::TelegramConfig;
use crate::infrastructure::notifier::telegram::DEFAULT_API_URL;

/// Where notifications go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierKind {
    /// Telegram Bot API.
    #[default]
    Telegram,
    /// Log only (dry run).
    Log,
}

/// Notifier selection and credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Selected adapter.
    #[serde(default)]
    pub kind: NotifierKind,
    /// Telegram settings, required when `kind` is `telegram`.
    #[serde(default)]
    pub telegram: TelegramSection,
}

/// Telegram bot settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    /// Bot token.
    #[serde(default)]
    pub bot_token: String,
    /// Recipient chat id.
    #[serde(default)]
    pub chat_id: String,
    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TelegramSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSection")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TelegramSection {
    /// Adapter configuration.
    #[must_use]
    pub fn to_telegram_config(&self) -> TelegramConfig {
        let mut config = TelegramConfig::new(self.bot_token.clone(), self.chat_id.clone())
            .with_api_url(self.api_url.clone());
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}
