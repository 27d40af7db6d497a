//! Error types for the IPO Monitor.

use thiserror::Error;

/// Result type alias using the monitor error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the monitor.
///
/// Only unrecoverable conditions live here. Degraded outcomes (an empty
/// fetch, a malformed record field) are modeled as values by the modules
/// that produce them and never reach this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery failure
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl Error {
    /// Check if this is a configuration error.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a delivery error.
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(Error::Config("missing secret".into()).is_config());
        assert!(!Error::Config("missing secret".into()).is_delivery());
        assert!(Error::Delivery("send failed".into()).is_delivery());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Config("MAIL_PASS environment variable not set".into());
        assert!(err.to_string().contains("MAIL_PASS"));

        let err = Error::Delivery("email notification failed".into());
        assert!(err.to_string().starts_with("Delivery error"));
    }
}
