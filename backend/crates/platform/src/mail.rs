//! Outbound mail
//!
//! [`Mailer`] is the only capability the rest of the workspace depends on.
//! [`HttpMailer`] posts messages to a transactional mail API, [`LogMailer`]
//! only records them (local development, or when no mail API is configured).

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// A single outbound message with plain text and HTML bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail API rejected the message with status {0}")]
    Rejected(u16),

    #[error("Mailer configuration error: {0}")]
    Config(String),
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

// ============================================================================
// HTTP mail API
// ============================================================================

#[derive(Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Sends mail through an HTTP API that accepts `{from, to, subject, text, html}`
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(MailError::Config("mail endpoint is empty".into()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = OutboundMail {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Mail API rejected message");
            return Err(MailError::Rejected(status.as_u16()));
        }

        tracing::info!(subject = %message.subject, "Mail accepted by API");
        Ok(())
    }
}

// ============================================================================
// Logging mailer
// ============================================================================

/// Writes messages to the log instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        tracing::info!(to = %message.to, subject = %message.subject, "Mail not delivered (log mailer)");
        tracing::debug!(body = %message.text, "Mail body");
        Ok(())
    }
}

// ============================================================================
// Runtime selection
// ============================================================================

/// Mailer chosen at startup from configuration
#[derive(Debug, Clone)]
pub enum ConfiguredMailer {
    Http(HttpMailer),
    Log(LogMailer),
}

impl Mailer for ConfiguredMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        match self {
            ConfiguredMailer::Http(m) => Mailer::send(m, message).await,
            ConfiguredMailer::Log(m) => Mailer::send(m, message).await,
        }
    }
}
