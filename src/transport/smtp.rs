use async_trait::async_trait;
use lettre::message::{Mailbox, Mailboxes, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailTransport, OutgoingMail, TransportError};
use crate::config::{SmtpConfig, TlsMode};

/// SMTP transport, connected lazily and reused across requests
pub struct SmtpMailer {
    /// `None` when no SMTP settings were supplied; every send then fails
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, TransportError> {
        let builder = match config.tls {
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            TlsMode::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?,
        };

        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = builder.port(config.port).credentials(creds).build();

        Ok(Self {
            transport: Some(transport),
        })
    }

    pub const fn unconfigured() -> Self {
        Self { transport: None }
    }
}

fn build_message(mail: &OutgoingMail) -> Result<Message, TransportError> {
    let from: Mailbox = mail.from.parse()?;
    let to: Mailboxes = mail.to.parse()?;

    let mut builder = Message::builder().from(from).subject(mail.subject.clone());
    for mailbox in to {
        builder = builder.to(mailbox);
    }

    Ok(builder
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())?)
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn dispatch(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let transport = self.transport.as_ref().ok_or(TransportError::NotConfigured)?;
        let message = build_message(mail)?;

        tracing::info!(
            "Sending email to '{}' with subject '{}'",
            mail.to,
            mail.subject
        );

        transport.send(message).await?;

        tracing::info!("Message to {} sent successfully", mail.to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            from: "drafts@example.com".to_string(),
            to: to.to_string(),
            subject: "Quarterly review".to_string(),
            html: "Hello<br>World".to_string(),
        }
    }

    #[test]
    fn message_carries_every_recipient_in_one_to_header() {
        let message = build_message(&mail("a@example.com, b@example.com")).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("To: a@example.com, b@example.com"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("Hello<br>World"));
    }

    #[test]
    fn malformed_recipient_is_an_address_error() {
        let result = build_message(&mail("not-an-address"));

        assert!(matches!(result, Err(TransportError::AddressFormat(_))));
    }

    #[tokio::test]
    async fn mailer_builds_for_every_tls_mode() {
        for tls in [TlsMode::Starttls, TlsMode::Tls, TlsMode::None] {
            let config = SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 2525,
                username: "user".to_string(),
                password: "pass".to_string(),
                sender: None,
                tls,
            };
            assert!(SmtpMailer::new(&config).is_ok());
        }
    }

    #[tokio::test]
    async fn unconfigured_mailer_refuses_to_send() {
        let result = SmtpMailer::unconfigured()
            .dispatch(&mail("a@example.com"))
            .await;

        assert!(matches!(result, Err(TransportError::NotConfigured)));
    }
}
