//! IPO Monitor - scheduled NASDAQ IPO screening job.
//!
//! One run per invocation: fetch the priced-IPO calendar, screen for
//! offerings priced today above the $200M threshold, email the outcome.
//! The invoking scheduler is responsible for serializing runs.

use anyhow::Result;
use ipo_common::config::{Config, ObservabilityConfig};
use ipo_common::logging::init_logging;
use ipo_monitor::calendar::IpoCalendarClient;
use ipo_monitor::notifier::EmailNotifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let observability = ObservabilityConfig::from_env();
    init_logging(&observability.log_level, &observability.log_format);

    tracing::info!("IPO Monitor v{}", env!("CARGO_PKG_VERSION"));

    // The secret is required before any work begins; without it no
    // notification could be sent, so this is fatal.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return Err(e.into());
        }
    };

    let client = IpoCalendarClient::new();
    let notifier = EmailNotifier::new(config.email);

    ipo_monitor::run(&client, &notifier).await
}
