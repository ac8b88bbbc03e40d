//! Domain errors shared by the monitor's bounded contexts.

use std::fmt;

/// Domain-level errors that can occur while validating business values.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_invalid_value_display() {
        let err = DomainError::InvalidValue {
            field: "symbol".to_string(),
            message: "Symbol cannot be empty".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("symbol"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidValue {
            field: "display_name".to_string(),
            message: "must not be empty".to_string(),
        });
        assert!(err.to_string().contains("display_name"));
    }
}
