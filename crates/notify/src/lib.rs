//! `hostwatch-notify` — alert delivery over SMTP.
//!
//! [`EmailNotifier`] wraps the `lettre` async SMTP transport to send the
//! plain-text alert email rendered by the core. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed — the pipeline then logs alerts instead of sending them.
//!
//! Delivery is best-effort: one attempt, bounded by an explicit timeout
//! so a hung relay cannot stall the run indefinitely.

use std::time::Duration;

use async_trait::async_trait;

use hostwatch_core::alert::AlertMessage;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for alert delivery failures.
///
/// Recovered locally by the orchestrator: logged, never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The send did not complete within the configured timeout.
    #[error("Email send timed out after {0:?}")]
    Timeout(Duration),
}

// ---------------------------------------------------------------------------
// Notifier trait
// ---------------------------------------------------------------------------

/// Capability for delivering a rendered alert over the outbound channel.
///
/// The pipeline depends on this trait rather than on SMTP directly, so
/// tests can observe delivery without a relay.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError>;
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "hostwatch@localhost";

/// Default bound on a single send attempt.
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the SMTP alert channel.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Fixed alert recipient.
    pub recipient: String,
    /// Optional SMTP username (sender identity secret).
    pub smtp_user: Option<String>,
    /// Optional SMTP password (sender secret).
    pub smtp_password: Option<String>,
    /// Bound on a single send attempt.
    pub send_timeout: Duration,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `SMTP_HOST` and `ALERT_RECIPIENT` are
    /// set, signalling that alert delivery is not configured and should
    /// be skipped.
    ///
    /// | Variable            | Required | Default               |
    /// |---------------------|----------|-----------------------|
    /// | `SMTP_HOST`         | yes      | —                     |
    /// | `ALERT_RECIPIENT`   | yes      | —                     |
    /// | `SMTP_PORT`         | no       | `587`                 |
    /// | `SMTP_FROM`         | no       | `hostwatch@localhost` |
    /// | `SMTP_USER`         | no       | —                     |
    /// | `SMTP_PASSWORD`     | no       | —                     |
    /// | `SEND_TIMEOUT_SECS` | no       | `30`                  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let recipient = std::env::var("ALERT_RECIPIENT").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            recipient,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            send_timeout: std::env::var("SEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SEND_TIMEOUT),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

/// Sends alert emails via SMTP.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create a new notifier with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    async fn deliver(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| DeliveryError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        match tokio::time::timeout(self.config.send_timeout, mailer.send(email)).await {
            Ok(result) => {
                result?;
                tracing::info!(to = %self.config.recipient, "Alert email sent");
                Ok(())
            }
            Err(_) => Err(DeliveryError::Timeout(self.config.send_timeout)),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        self.deliver(message).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
