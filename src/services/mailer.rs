//! Outbound mail transport over SMTP.
//!
//! The transport is built once at startup from static configuration. If the
//! SMTP credentials are absent or the relay cannot be constructed, the
//! process runs with no transport and every enquiry dispatch fails
//! identically until restart; there is no runtime re-initialization.
//!
//! [`MailTransport`] is the seam the enquiry pipeline depends on, so tests
//! can substitute a recording fake for the real SMTP client.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::Config;

/// Errors that can occur when building or using the mail transport.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (connection, authentication, rejection).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// A plain-text email ready for dispatch.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Recipient addresses; already de-duplicated by the caller.
    pub to: Vec<String>,

    /// Optional reply-to, e.g. the enquirer's own address on operator
    /// notices so the operator can answer directly.
    pub reply_to: Option<String>,

    pub subject: String,
    pub body: String,
}

/// The seam between the enquiry pipeline and the actual SMTP client.
pub trait MailTransport {
    /// The address the transport authenticates as, if any. Used as a
    /// fallback operator recipient.
    fn authenticated_address(&self) -> Option<&str>;

    /// Send one message. Synchronous from the caller's point of view: the
    /// future resolves only once the transport has accepted or rejected it.
    fn send(&self, email: &OutboundEmail) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Production [`MailTransport`] backed by lettre's async SMTP client.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    authenticated_address: Option<String>,
}

impl SmtpMailer {
    /// Build the mailer from configuration.
    ///
    /// Callers should gate on [`Config::smtp_configured`] first; this
    /// returns an error if host or credentials are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay cannot be constructed or the "from"
    /// identity does not parse as a mailbox.
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| MailError::Build("SMTP_HOST is not set".to_string()))?;
        let (user, password) = match (&config.smtp_user, &config.smtp_password) {
            (Some(user), Some(password)) => (user.clone(), password.clone()),
            _ => return Err(MailError::Build("SMTP credentials are not set".to_string())),
        };

        // SMTP_SECURE selects implicit TLS (465-style) over STARTTLS
        let builder = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };
        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(user.clone(), password))
            .build();

        let from: Mailbox = format!("{} <{}>", config.mail_from_name, config.mail_from_address)
            .parse()?;

        Ok(Self {
            transport,
            from,
            authenticated_address: Some(user),
        })
    }

    /// Probe SMTP reachability for the diagnostic endpoint.
    pub async fn verify(&self) -> bool {
        self.transport.test_connection().await.unwrap_or(false)
    }
}

impl MailTransport for SmtpMailer {
    fn authenticated_address(&self) -> Option<&str> {
        self.authenticated_address.as_deref()
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN);

        for recipient in &email.to {
            builder = builder.to(recipient.parse()?);
        }
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let message = builder
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        tracing::info!(subject = %email.subject, recipients = email.to.len(), "Email sent");
        Ok(())
    }
}
