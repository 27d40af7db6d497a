//! Configuration for the IPO Monitor.
//!
//! All configuration is read once from the process environment at startup
//! and passed by value into the components that need it. There is no config
//! file and no ambient global state.
//!
//! # Environment variables
//!
//! | Variable         | Required | Default                        |
//! |------------------|----------|--------------------------------|
//! | `EMAIL_FROM`     | no       | `ipo.monitor.alerts@gmail.com` |
//! | `EMAIL_TO`       | no       | `ipo.monitor.alerts@gmail.com` |
//! | `MAIL_PASS`      | yes      | —                              |
//! | `IPO_LOG_LEVEL`  | no       | `info`                         |
//! | `IPO_LOG_FORMAT` | no       | `pretty`                       |

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default sender address when `EMAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "ipo.monitor.alerts@gmail.com";

/// Default recipient address when `EMAIL_TO` is not set.
const DEFAULT_TO_ADDRESS: &str = "ipo.monitor.alerts@gmail.com";

/// Top-level monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Email delivery configuration
    pub email: EmailConfig,
    /// Logging configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// The `MAIL_PASS` secret is required; its absence is fatal before any
    /// network activity begins.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            email: EmailConfig::from_env()?,
            observability: ObservabilityConfig::from_env(),
        })
    }
}

/// Email delivery configuration (SMTP outbound only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// From address, also used as the SMTP username
    pub from_address: String,
    /// Recipient address
    pub to_address: String,
    /// SMTP app password, sanitized via [`sanitize_secret`]
    pub password: String,
}

impl EmailConfig {
    /// Load email configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let raw_pass = std::env::var("MAIL_PASS")
            .map_err(|_| Error::Config("MAIL_PASS environment variable not set".into()))?;

        Ok(Self {
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            to_address: std::env::var("EMAIL_TO")
                .unwrap_or_else(|_| DEFAULT_TO_ADDRESS.to_string()),
            password: sanitize_secret(&raw_pass),
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Output format: "json" for structured JSON, "pretty" for human-readable
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Load logging configuration from the process environment.
    ///
    /// Infallible so logging can be initialized before the fatal secret
    /// check runs.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("IPO_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: std::env::var("IPO_LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }
}

/// Sanitize a raw secret read from the environment.
///
/// App passwords copied from provider UIs routinely arrive wrapped in
/// quotes or with stray spaces and newlines. Quote characters and all
/// whitespace (internal and external) are removed before use.
pub fn sanitize_secret(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect()
}
