//! Email notification for screening results.
//!
//! One plaintext email per run, reporting either the qualified tickers, an
//! explicit none-found result, or an error condition. Delivery is a single
//! TLS SMTP session to a fixed provider; the transport is built per send
//! and releases its connection on every exit path.
//!
//! Senders report delivery as a boolean and never propagate - the
//! orchestration decides whether a failed send is fatal.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;
use tracing::{error, info};

use ipo_common::config::EmailConfig;

/// Fixed SMTP provider host (SMTPS, port 465).
const SMTP_HOST: &str = "smtp.gmail.com";

/// SMTP session timeout in seconds.
const SMTP_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Message Composition
// ============================================================================

/// Subject and body, constructed immediately before send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

/// Compose the notification for one run's outcome.
///
/// Priority order: an error report wins over everything, then a non-empty
/// qualified set, then the none-found summary.
pub fn compose(qualified: &[String], error: Option<&str>) -> NotificationMessage {
    if let Some(error) = error {
        return NotificationMessage {
            subject: "❌ IPO Monitor - Error Occurred".to_string(),
            body: format!(
                "The IPO monitoring script encountered an error:\n\n{}\n\nPlease check the logs.",
                error
            ),
        };
    }

    if !qualified.is_empty() {
        let tickers = qualified
            .iter()
            .map(|ticker| format!("• {}", ticker))
            .collect::<Vec<_>>()
            .join("\n");

        return NotificationMessage {
            subject: format!("🔔 IPO Monitor - {} Ticker(s) Found", qualified.len()),
            body: format!("IPO tickers with offer amount > $200M today:\n\n{}", tickers),
        };
    }

    NotificationMessage {
        subject: "✓ IPO Monitor - No Large IPOs Today".to_string(),
        body: "No IPOs with offer amount above $200M were found for today.".to_string(),
    }
}

// ============================================================================
// Notify Seam
// ============================================================================

/// Notification delivery seam.
pub trait Notify {
    /// Send the run's outcome. Returns true if the message was delivered.
    fn send_notification(&self, qualified: &[String], error: Option<&str>) -> bool;
}

// ============================================================================
// Email Notifier
// ============================================================================

/// SMTP-backed notifier delivering to a fixed recipient.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create a new notifier with the given email configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn create_transport(&self) -> anyhow::Result<SmtpTransport> {
        let creds = Credentials::new(
            self.config.from_address.clone(),
            self.config.password.clone(),
        );

        Ok(SmtpTransport::relay(SMTP_HOST)?
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .credentials(creds)
            .build())
    }
}

impl Notify for EmailNotifier {
    fn send_notification(&self, qualified: &[String], error: Option<&str>) -> bool {
        let message = compose(qualified, error);

        let from: Mailbox = match self.config.from_address.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!(error = %e, "Invalid from address");
                return false;
            }
        };

        let to: Mailbox = match self.config.to_address.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                error!(error = %e, "Invalid recipient address");
                return false;
            }
        };

        let email = match Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .body(message.body)
        {
            Ok(email) => email,
            Err(e) => {
                error!(error = %e, "Failed to build email");
                return false;
            }
        };

        let transport = match self.create_transport() {
            Ok(transport) => transport,
            Err(e) => {
                error!(error = %e, "SMTP setup failed");
                return false;
            }
        };

        info!(subject = %message.subject, "Attempting to send email");

        match transport.send(&email) {
            Ok(_) => {
                info!("Email sent successfully");
                true
            }
            Err(e) if e.is_timeout() => {
                error!(error = %e, "SMTP session timed out");
                false
            }
            Err(e) if e.is_permanent() => {
                error!(
                    error = %e,
                    "SMTP authentication failed. Check: 1) App password is correct, 2) 2FA is enabled"
                );
                false
            }
            Err(e) => {
                error!(error = %e, "SMTP error occurred");
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            from_address: "sender@example.com".into(),
            to_address: "ops@example.com".into(),
            password: "app-password".into(),
        }
    }

    #[test]
    fn test_compose_error_wins_over_tickers() {
        let qualified = vec!["AAA".to_string()];
        let message = compose(&qualified, Some("Failed to retrieve IPO data"));

        assert!(message.subject.contains("Error Occurred"));
        assert!(message.body.contains("Failed to retrieve IPO data"));
        assert!(message.body.contains("check the logs"));
        assert!(!message.body.contains("AAA"));
    }

    #[test]
    fn test_compose_lists_each_ticker_on_its_own_line() {
        let qualified = vec!["AAA".to_string(), "BBB".to_string()];
        let message = compose(&qualified, None);

        assert!(message.subject.contains("2 Ticker(s) Found"));
        assert!(message.body.contains("• AAA\n• BBB"));
    }

    #[test]
    fn test_compose_none_found() {
        let message = compose(&[], None);

        assert!(message.subject.contains("No Large IPOs Today"));
        assert!(message.body.contains("above $200M"));
    }

    #[test]
    fn test_transport_builds_with_test_credentials() {
        let notifier = EmailNotifier::new(test_config());
        assert!(notifier.create_transport().is_ok());
    }

    // Live delivery requires real credentials in the environment.
    // Run with: MAIL_PASS=xxx cargo test -- --ignored

    #[test]
    #[ignore = "requires valid SMTP credentials"]
    fn test_send_live_email() {
        let config = EmailConfig::from_env().expect("MAIL_PASS not set");
        let notifier = EmailNotifier::new(config);
        assert!(notifier.send_notification(&[], Some("live delivery check")));
    }
}
