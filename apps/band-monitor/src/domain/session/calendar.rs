//! Session Clock
//!
//! Classifies an instant as weekend, holiday, in-session or after-close in
//! the exchange's civil timezone. DST is handled by `chrono-tz`.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;

use super::errors::SessionError;

/// Regular session hours for an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    timezone: Tz,
    open: NaiveTime,
    close: NaiveTime,
    holidays: BTreeSet<NaiveDate>,
}

impl SessionClock {
    /// Build a clock. `open` must be strictly before `close`.
    pub fn new(timezone: Tz, open: NaiveTime, close: NaiveTime) -> Result<Self, SessionError> {
        if open >= close {
            return Err(SessionError::InvalidHours {
                open: open.format("%H:%M").to_string(),
                close: close.format("%H:%M").to_string(),
            });
        }

        Ok(Self {
            timezone,
            open,
            close,
            holidays: BTreeSet::new(),
        })
    }

    /// Build a clock from an IANA timezone name.
    pub fn from_timezone_name(
        name: &str,
        open: NaiveTime,
        close: NaiveTime,
    ) -> Result<Self, SessionError> {
        let timezone: Tz = name.parse().map_err(|_| SessionError::UnknownTimezone {
            name: name.to_string(),
        })?;
        Self::new(timezone, open, close)
    }

    /// US equities regular session: 09:30 to 16:00 New York time.
    #[must_use]
    pub fn us_equities() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            holidays: BTreeSet::new(),
        }
    }

    /// Add full-day closures.
    #[must_use]
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Exchange timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Session open (local time).
    #[must_use]
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    /// Session close (local time).
    #[must_use]
    pub const fn close(&self) -> NaiveTime {
        self.close
    }

    /// Calendar date at the exchange.
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    fn local_time(&self, now: DateTime<Utc>) -> NaiveTime {
        now.with_timezone(&self.timezone).time()
    }

    /// Saturday or Sunday at the exchange.
    #[must_use]
    pub fn is_weekend(&self, now: DateTime<Utc>) -> bool {
        matches!(
            now.with_timezone(&self.timezone).weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }

    /// Local date is a configured full-day closure.
    #[must_use]
    pub fn is_holiday(&self, now: DateTime<Utc>) -> bool {
        self.holidays.contains(&self.local_date(now))
    }

    /// Local clock time is within `[open, close)`.
    #[must_use]
    pub fn in_session(&self, now: DateTime<Utc>) -> bool {
        let time = self.local_time(now);
        time >= self.open && time < self.close
    }

    /// The session that started on `session_date` is over.
    #[must_use]
    pub fn has_ended(&self, now: DateTime<Utc>, session_date: NaiveDate) -> bool {
        let local = now.with_timezone(&self.timezone);
        local.date_naive() > session_date || local.time() >= self.close
    }
}
