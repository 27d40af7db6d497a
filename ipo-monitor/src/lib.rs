//! IPO Monitor Library
//!
//! Screens NASDAQ's priced-IPO calendar for large offerings and reports the
//! outcome by email. A linear job, not a service:
//!
//! ```text
//! fetch calendar ──► screen (priced today, value > $200M) ──► notify
//! ```
//!
//! Each stage is stateless and independently testable. The fetch degrades
//! every failure to an empty result; valuation degrades malformed records
//! to zero; only a failed primary notification (or missing configuration at
//! startup) ends the run with an error.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod calendar;
pub mod notifier;
pub mod screener;
pub mod valuation;

use anyhow::Result;
use ipo_common::error::Error;

use crate::calendar::IpoCalendarClient;
use crate::notifier::Notify;

/// One monitoring cycle: fetch, screen, notify.
///
/// An empty fetch degrades to an error-notification email and a successful
/// exit. A failed primary notification is fatal.
pub async fn run_cycle<N: Notify>(client: &IpoCalendarClient, notifier: &N) -> Result<()> {
    let today = screener::eastern_trade_date();
    tracing::info!(date = %today, "Checking IPOs priced today (US Eastern)");

    let offerings = client.fetch_priced_offerings().await;

    if offerings.is_empty() {
        tracing::warn!("No IPO data retrieved or API returned empty results");
        // The run still exits zero if this report fails to send; the
        // notifier has already logged the failure.
        let _ = notifier.send_notification(&[], Some("Failed to retrieve IPO data from NASDAQ API"));
        return Ok(());
    }

    let qualified = screener::screen_offerings(&offerings, &today);
    tracing::info!(count = qualified.len(), tickers = ?qualified, "Screening complete");

    if !notifier.send_notification(&qualified, None) {
        return Err(Error::Delivery("email notification failed".into()).into());
    }

    Ok(())
}

/// Run one cycle under the top-level failure guard.
///
/// Any error is logged with context, reported once via a best-effort error
/// email (its own failure only logged), and then propagated so the host
/// environment records the run as failed.
pub async fn run<N: Notify>(client: &IpoCalendarClient, notifier: &N) -> Result<()> {
    match run_cycle(client, notifier).await {
        Ok(()) => {
            tracing::info!("IPO monitor run completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Critical error in monitor run");
            if !notifier.send_notification(&[], Some(&e.to_string())) {
                tracing::error!("Failed to send error notification email");
            }
            Err(e)
        }
    }
}
