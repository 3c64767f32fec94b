/// Outbound email
///
/// A [`Mailer`] is chosen once at start-up from [`EmailSettings`]:
/// Resend's HTTP API when an API key is configured, SMTP when credentials are
/// configured, otherwise [`LogMailer`], which only records what would have
/// been sent.
///
/// Request handlers never wait on delivery. They hand the message to
/// [`spawn_send`], which logs failures and moves on.
///
/// # Example
///
/// ```no_run
/// use staffing_shared::email::{self, templates, EmailSettings};
///
/// # fn example(settings: &EmailSettings) -> Result<(), email::MailError> {
/// let mailer = email::from_settings(settings)?;
/// let content = templates::contact_form(
///     "Ada Lovelace",
///     "ada@example.com",
///     "555-0100",
///     "Staffing question",
///     "Do you place analysts?",
/// );
/// email::spawn_send(mailer, content.to(&settings.inbox));
/// # Ok(())
/// # }
/// ```

pub mod resend;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

pub const DEFAULT_FROM_ADDRESS: &str = "contact@humanlystaffing.com";
pub const DEFAULT_SMTP_HOST: &str = "mail.mxrouting.net";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const SENDER_NAME: &str = "Humanly Staffing";

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    /// Bare sender address, also the site inbox for admin notifications
    pub from_address: String,

    /// Recipient of contact-form, application and talent-request notices
    pub inbox: String,

    pub resend_api_key: Option<String>,
    pub smtp: Option<SmtpSettings>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            inbox: DEFAULT_FROM_ADDRESS.to_string(),
            resend_api_key: None,
            smtp: None,
        }
    }
}

impl EmailSettings {
    /// `Humanly Staffing <address>`
    pub fn sender(&self) -> String {
        format!("{} <{}>", SENDER_NAME, self.from_address)
    }

    pub fn provider(&self) -> Provider {
        if self
            .resend_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && !key.contains("placeholder"))
        {
            return Provider::Resend;
        }

        if self.smtp.as_ref().is_some_and(|smtp| {
            !smtp.username.is_empty()
                && !smtp.password.is_empty()
                && !smtp.password.contains("your-email-password")
        }) {
            return Provider::Smtp;
        }

        Provider::Log
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Resend,
    Smtp,
    Log,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("invalid message: {0}")]
    Message(#[from] lettre::error::Error),
}

/// Delivers a single message, returning the provider's message id
#[async_trait]
pub trait Mailer: Send + Sync {
    fn provider(&self) -> Provider;

    async fn send(&self, email: &Email) -> Result<String, MailError>;
}

/// Records messages in the log instead of delivering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn provider(&self) -> Provider {
        Provider::Log
    }

    async fn send(&self, email: &Email) -> Result<String, MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Email not configured, message not sent");
        Ok(format!("mock-email-{}", chrono::Utc::now().timestamp_millis()))
    }
}

/// Builds the mailer for the configured provider
pub fn from_settings(settings: &EmailSettings) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match (settings.provider(), &settings.resend_api_key, &settings.smtp) {
        (Provider::Resend, Some(key), _) => Arc::new(ResendMailer::new(key.clone(), settings.sender())?),
        (Provider::Smtp, _, Some(smtp)) => Arc::new(SmtpMailer::new(smtp, &settings.sender())?),
        _ => Arc::new(LogMailer),
    };

    tracing::info!(provider = ?mailer.provider(), "Email provider selected");
    Ok(mailer)
}

/// Sends in the background; failures are logged and dropped
pub fn spawn_send(mailer: Arc<dyn Mailer>, email: Email) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match mailer.send(&email).await {
            Ok(id) => tracing::debug!(id = %id, to = %email.to, "Email sent"),
            Err(e) => tracing::error!(error = %e, to = %email.to, subject = %email.subject, "Failed to send email"),
        }
    })
}
