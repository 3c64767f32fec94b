/// SMTP delivery through lettre's async transport

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Email, MailError, Mailer, Provider, SmtpSettings};

/// Port for implicit TLS; anything else negotiates STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings, from: &str) -> Result<Self, MailError> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: from.parse()?,
        })
    }

    fn message(&self, email: &Email) -> Result<Message, MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                plain_text(&email.html),
                email.html.clone(),
            ))?;
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn provider(&self) -> Provider {
        Provider::Smtp
    }

    async fn send(&self, email: &Email) -> Result<String, MailError> {
        let message = self.message(email)?;
        let response = self.transport.send(message).await?;
        let id = response.message().collect::<Vec<_>>().join(" ");
        tracing::info!(id = %id, "Email sent via SMTP");
        Ok(id)
    }
}

/// Drops markup, keeping text content
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(port: u16) -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port,
            username: "user".to_string(),
            password: "pass".to_string(),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<p>Hi <strong>Ada</strong></p>"), "Hi Ada");
        assert_eq!(plain_text("no markup"), "no markup");
    }

    #[test]
    fn test_builds_message() {
        let mailer = SmtpMailer::new(&settings(587), "Humanly Staffing <contact@humanlystaffing.com>").unwrap();
        let email = Email {
            to: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        };
        let formatted = String::from_utf8(mailer.message(&email).unwrap().formatted()).unwrap();

        assert!(formatted.contains("To: ada@example.com"));
        assert!(formatted.contains("Subject: Hi"));
    }

    #[test]
    fn test_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&settings(465), "contact@humanlystaffing.com").unwrap();
        let email = Email {
            to: "not an address".to_string(),
            subject: "Hi".to_string(),
            html: String::new(),
        };
        assert!(matches!(mailer.message(&email), Err(MailError::Address(_))));
    }
}
