//! Offer-value computation for priced IPO records.
//!
//! Two-tier strategy, in strict priority order:
//! 1. The feed's precomputed `dollarValueOfSharesOffered` field.
//! 2. `proposedSharePrice` x `sharesOffered`.
//!
//! Monetary fields arrive as display strings (`"$250,000,000"`), so values
//! are cleaned of currency symbols, thousands separators, and whitespace
//! before parsing. The public entry point is total: any malformed field is
//! logged and valued at zero, leaving the threshold filter to exclude the
//! offering instead of failing the run.

use thiserror::Error;
use tracing::warn;

use crate::calendar::{FieldError, OfferingRecord};

/// Precomputed total dollar value of the offering.
const DIRECT_VALUE_FIELD: &str = "dollarValueOfSharesOffered";

/// Proposed per-share price.
const PRICE_FIELD: &str = "proposedSharePrice";

/// Number of shares offered.
const SHARES_FIELD: &str = "sharesOffered";

/// Per-record computation error. Always recovered by [`offer_value`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ValueError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("field '{field}' is not numeric: '{value}'")]
    NotNumeric {
        field: &'static str,
        value: String,
    },
}

/// Strip currency symbols, thousands separators, and whitespace.
fn strip_money(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect()
}

fn compute(record: &OfferingRecord) -> Result<f64, ValueError> {
    // Tier 1: direct dollar value. Strict priority - a malformed direct
    // field is a field error, not a fallthrough to tier 2.
    if let Some(direct) = record.text(DIRECT_VALUE_FIELD)? {
        if !direct.is_empty() {
            let cleaned = strip_money(direct);
            return cleaned.parse::<f64>().map_err(|_| ValueError::NotNumeric {
                field: DIRECT_VALUE_FIELD,
                value: direct.to_string(),
            });
        }
    }

    // Tier 2: price x shares, with absent fields defaulting to "0".
    let price = strip_money(record.text(PRICE_FIELD)?.unwrap_or("0"));
    let shares = strip_money(record.text(SHARES_FIELD)?.unwrap_or("0"));

    if price.is_empty() || shares.is_empty() {
        return Ok(0.0);
    }

    let price: f64 = price.parse().map_err(|_| ValueError::NotNumeric {
        field: PRICE_FIELD,
        value: price.clone(),
    })?;
    let shares: f64 = shares.parse().map_err(|_| ValueError::NotNumeric {
        field: SHARES_FIELD,
        value: shares.clone(),
    })?;

    Ok(price * shares)
}

/// Compute the total offer value for one priced IPO record.
///
/// Never fails: malformed or missing numeric fields are logged at warning
/// level with the offering's ticker and valued at zero, so the downstream
/// threshold filter excludes the record instead of crashing the run.
pub fn offer_value(record: &OfferingRecord) -> f64 {
    match compute(record) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                ticker = record.ticker().unwrap_or("Unknown"),
                error = %e,
                "Failed to calculate offer amount"
            );
            0.0
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
