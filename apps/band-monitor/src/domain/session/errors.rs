//! Session Errors

use thiserror::Error;

/// Errors raised when building a session calendar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Timezone name is not a known IANA zone.
    #[error("Unknown timezone: {name}")]
    UnknownTimezone {
        /// Name as configured.
        name: String,
    },

    /// Session bounds are not ordered.
    #[error("Session open {open} must be before close {close}")]
    InvalidHours {
        /// Configured open time.
        open: String,
        /// Configured close time.
        close: String,
    },
}
