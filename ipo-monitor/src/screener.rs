//! Date and threshold screening for priced offerings.
//!
//! An offering qualifies iff it was priced today in the exchange's local
//! calendar (US Eastern) and its computed offer value strictly exceeds the
//! threshold.
//!
//! The record's `pricedDate` is compared as a literal string against
//! today's date formatted identically - the feed already reports dates in
//! the exchange's calendar, and no parsing or timezone normalization is
//! applied to the record's own field.

use chrono::Utc;
use chrono_tz::America::New_York;
use tracing::info;

use crate::calendar::OfferingRecord;
use crate::valuation;

/// Minimum offer value, in source-feed dollars, for a ticker to qualify.
/// The comparison is strict: exactly this value does not qualify.
pub const OFFER_VALUE_THRESHOLD: f64 = 200_000_000.0;

/// Today's date in the exchange's local calendar (US Eastern), formatted
/// `MM/DD/YYYY` to match the feed's `pricedDate` field.
///
/// chrono-tz handles DST, so the calendar flips at midnight Eastern
/// regardless of where the job runs.
pub fn eastern_trade_date() -> String {
    Utc::now()
        .with_timezone(&New_York)
        .format("%m/%d/%Y")
        .to_string()
}

/// Select tickers priced on `today` whose offer value strictly exceeds
/// [`OFFER_VALUE_THRESHOLD`].
///
/// Logs ticker and computed value for every offering priced today. Absent
/// tickers report as "N/A".
pub fn screen_offerings(offerings: &[OfferingRecord], today: &str) -> Vec<String> {
    let mut qualified = Vec::new();

    for offering in offerings {
        if offering.priced_date() != Some(today) {
            continue;
        }

        let ticker = offering.ticker().unwrap_or("N/A");
        let value = valuation::offer_value(offering);
        info!(ticker, value, "Offering priced today");

        if value > OFFER_VALUE_THRESHOLD {
            info!(ticker, value, "Qualified");
            qualified.push(ticker.to_string());
        }
    }

    qualified
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const TODAY: &str = "07/01/2026";

    fn record(value: Value) -> OfferingRecord {
        OfferingRecord::new(value.as_object().expect("test row is an object").clone())
    }

    #[test]
    fn test_qualifies_on_matching_date_above_threshold() {
        let offerings = vec![record(json!({
            "proposedTickerSymbol": "AAA",
            "pricedDate": TODAY,
            "dollarValueOfSharesOffered": "$250,000,000"
        }))];

        assert_eq!(screen_offerings(&offerings, TODAY), vec!["AAA"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let offerings = vec![
            record(json!({
                "proposedTickerSymbol": "EXACT",
                "pricedDate": TODAY,
                "dollarValueOfSharesOffered": "$200,000,000"
            })),
            record(json!({
                "proposedTickerSymbol": "OVER",
                "pricedDate": TODAY,
                "dollarValueOfSharesOffered": "$200,000,001"
            })),
        ];

        assert_eq!(screen_offerings(&offerings, TODAY), vec!["OVER"]);
    }

    #[test]
    fn test_other_dates_are_excluded() {
        let offerings = vec![
            record(json!({
                "proposedTickerSymbol": "OLD",
                "pricedDate": "06/30/2026",
                "dollarValueOfSharesOffered": "$900,000,000"
            })),
            record(json!({
                "proposedTickerSymbol": "NODATE",
                "dollarValueOfSharesOffered": "$900,000,000"
            })),
        ];

        assert!(screen_offerings(&offerings, TODAY).is_empty());
    }

    #[test]
    fn test_date_match_is_literal_string_equality() {
        // Same calendar day written differently must not match.
        let offerings = vec![record(json!({
            "proposedTickerSymbol": "FMT",
            "pricedDate": "7/1/2026",
            "dollarValueOfSharesOffered": "$900,000,000"
        }))];

        assert!(screen_offerings(&offerings, TODAY).is_empty());
    }

    #[test]
    fn test_missing_ticker_reports_as_na() {
        let offerings = vec![record(json!({
            "pricedDate": TODAY,
            "dollarValueOfSharesOffered": "$300,000,000"
        }))];

        assert_eq!(screen_offerings(&offerings, TODAY), vec!["N/A"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let offerings = vec![
            record(json!({
                "proposedTickerSymbol": "AAA",
                "pricedDate": TODAY,
                "dollarValueOfSharesOffered": "$300,000,000"
            })),
            record(json!({
                "proposedTickerSymbol": "SML",
                "pricedDate": TODAY,
                "dollarValueOfSharesOffered": "$10,000,000"
            })),
            record(json!({
                "proposedTickerSymbol": "BBB",
                "pricedDate": TODAY,
                "proposedSharePrice": "$30.00",
                "sharesOffered": "10,000,000"
            })),
        ];

        assert_eq!(screen_offerings(&offerings, TODAY), vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_eastern_trade_date_format() {
        let today = eastern_trade_date();
        assert_eq!(today.len(), 10);

        let bytes = today.as_bytes();
        assert_eq!(bytes[2], b'/');
        assert_eq!(bytes[5], b'/');
        for (i, b) in bytes.iter().enumerate() {
            if i != 2 && i != 5 {
                assert!(b.is_ascii_digit(), "unexpected character in {}", today);
            }
        }
    }
}
