//! Trading session configuration.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::session::SessionClock;

/// Exchange calendar and hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// IANA timezone of the exchange.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Session open, `HH:MM` local time.
    #[serde(default = "default_open")]
    pub open: String,
    /// Session close, `HH:MM` local time.
    #[serde(default = "default_close")]
    pub close: String,
    /// Full-day closures (`YYYY-MM-DD`).
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            open: default_open(),
            close: default_close(),
            holidays: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Build the session clock.
    pub fn to_session_clock(&self) -> Result<SessionClock, ConfigError> {
        let open = parse_time("session.open", &self.open)?;
        let close = parse_time("session.close", &self.close)?;

        SessionClock::from_timezone_name(&self.timezone, open, close)
            .map(|clock| clock.with_holidays(self.holidays.iter().copied()))
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ConfigError::ValidationError(format!("{field} must be HH:MM, got '{value}'"))
    })
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_open() -> String {
    "09:30".to_string()
}

fn default_close() -> String {
    "16:00".to_string()
}
