//! NASDAQ IPO-calendar adapter.
//!
//! # API
//! GET <https://api.nasdaq.com/api/ipo/calendar>
//!
//! The endpoint rejects default HTTP client identifiers, so requests carry
//! a browser-like `User-Agent`. The response nests the priced offerings as
//! `data.priced.rows`; the feed enforces no schema on the rows themselves.
//!
//! One attempt per invocation - the public contract degrades every failure
//! mode to an empty result after logging its specific cause.

use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

// ============================================================================
// Constants
// ============================================================================

/// NASDAQ API base URL
const NASDAQ_API_BASE: &str = "https://api.nasdaq.com";

/// IPO calendar endpoint
const CALENDAR_ENDPOINT: &str = "/api/ipo/calendar";

/// Request timeout in seconds
const FETCH_TIMEOUT_SECS: u64 = 15;

/// Browser-like identifier; the endpoint rejects default client identifiers
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Offering Record
// ============================================================================

/// One priced offering row from the calendar feed.
///
/// Rows are externally-sourced JSON objects with no enforced invariant
/// beyond "is a mapping": every field may be absent, null, or the wrong
/// type. Access goes through fallible typed accessors rather than a
/// derived struct so a single malformed row never fails the run.
#[derive(Debug, Clone)]
pub struct OfferingRecord(Map<String, Value>);

/// Per-field access error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field is present but not a JSON string
    #[error("field '{0}' is not a string")]
    NotText(&'static str),
}

impl OfferingRecord {
    /// Wrap a raw feed row.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Typed access to a string field.
    ///
    /// Absent and `null` both read as `None`; a present non-string value
    /// is an error for the caller to handle per record.
    pub fn text(&self, key: &'static str) -> Result<Option<&str>, FieldError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(FieldError::NotText(key)),
        }
    }

    /// Ticker symbol, if present and well-formed.
    pub fn ticker(&self) -> Option<&str> {
        self.text("proposedTickerSymbol").ok().flatten()
    }

    /// Priced date exactly as the feed reports it (`MM/DD/YYYY` expected).
    ///
    /// Deliberately not parsed: the screener compares it as a literal
    /// string against today's Eastern date.
    pub fn priced_date(&self) -> Option<&str> {
        self.text("pricedDate").ok().flatten()
    }
}

// ============================================================================
// Source Error
// ============================================================================

/// Errors from one calendar fetch attempt.
///
/// All variants are recovered inside [`IpoCalendarClient::fetch_priced_offerings`];
/// they exist so each failure mode is logged with its specific cause.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request exceeded the fetch timeout
    #[error("API request timed out after 15 seconds")]
    Timeout,
    /// Transport-level failure (DNS, connect, TLS)
    #[error("API request failed: {0}")]
    Network(String),
    /// Non-success HTTP status
    #[error("API request failed with HTTP status {0}")]
    Status(reqwest::StatusCode),
    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Json(String),
    /// Response JSON is missing one of the expected nesting keys
    #[error("Unexpected API response structure: '{0}' key missing")]
    UnexpectedShape(&'static str),
}

/// Walk the `data.priced.rows` nesting and collect the offering rows.
///
/// Each missing level is reported by name. A `rows` value that is not an
/// array counts as missing; non-object entries inside `rows` are dropped.
fn extract_rows(body: &Value) -> Result<Vec<OfferingRecord>, SourceError> {
    let rows = body
        .get("data")
        .ok_or(SourceError::UnexpectedShape("data"))?
        .get("priced")
        .ok_or(SourceError::UnexpectedShape("priced"))?
        .get("rows")
        .and_then(Value::as_array)
        .ok_or(SourceError::UnexpectedShape("rows"))?;

    Ok(rows
        .iter()
        .filter_map(|row| row.as_object().cloned().map(OfferingRecord::new))
        .collect())
}

// ============================================================================
// Calendar Client
// ============================================================================

/// NASDAQ IPO-calendar client.
///
/// Holds a pre-built `reqwest` client with the fetch timeout applied; the
/// base URL is overridable for tests.
pub struct IpoCalendarClient {
    base_url: String,
    client: reqwest::Client,
}

impl IpoCalendarClient {
    /// Create a client against the production NASDAQ API.
    pub fn new() -> Self {
        Self::with_base_url(NASDAQ_API_BASE)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Fetch today's priced IPOs from the NASDAQ calendar.
    ///
    /// Returns the priced rows, or an empty vector on any failure -
    /// never raises. One attempt per invocation.
    pub async fn fetch_priced_offerings(&self) -> Vec<OfferingRecord> {
        info!("Fetching IPO data from NASDAQ API");

        match self.try_fetch().await {
            Ok(offerings) => {
                info!(count = offerings.len(), "Successfully fetched priced IPOs");
                offerings
            }
            Err(e) => {
                error!(error = %e, "IPO calendar fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<OfferingRecord>, SourceError> {
        let url = format!("{}{}", self.base_url, CALENDAR_ENDPOINT);
        debug!(url = %url, "Requesting IPO calendar");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", BROWSER_USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else if e.is_connect() {
                    SourceError::Network("connection failed".into())
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Json(e.to_string())
            }
        })?;

        extract_rows(&body)
    }
}

impl Default for IpoCalendarClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
