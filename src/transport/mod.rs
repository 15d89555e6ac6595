mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// A fully composed message, ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    /// All recipients joined with ", "
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP settings are not configured")]
    NotConfigured,

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn dispatch(&self, mail: &OutgoingMail) -> Result<(), TransportError>;
}
