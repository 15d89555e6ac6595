mod error;

pub use error::{CONTENT_REQUIRED, EmailError, PROMPT_REQUIRED, RECIPIENTS_REQUIRED};

use crate::{
    dto::{EmailDraft, GenerateEmailRequest, GenerateEmailResponse, SendEmailRequest, SendEmailResponse},
    provider::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError},
    transport::{MailTransport, OutgoingMail},
};

use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are a professional email writer. \
Generate a well-structured, professional email based on the user's prompt. The email should be:
- Professional and clear
- Properly formatted with appropriate greetings and closings
- Concise but comprehensive
- Appropriate for business communication

Return only the email content without any additional text or explanations.";

pub const DEFAULT_GENERATED_SUBJECT: &str = "Generated Email";
pub const DEFAULT_SEND_SUBJECT: &str = "No Subject";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Tried in order until one returns content
    pub models: Vec<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationSettings {
    pub const fn new(models: Vec<String>) -> Self {
        Self {
            models,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Clone)]
pub struct EmailService {
    provider: Arc<dyn CompletionProvider>,
    transport: Arc<dyn MailTransport>,
    settings: GenerationSettings,
    sender: String,
}

fn subject_or(subject: Option<String>, default: &str) -> String {
    subject
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Line breaks become `<br>`; everything else passes through untouched
fn to_html(content: &str) -> String {
    content.replace("\r\n", "<br>").replace('\n', "<br>")
}

impl EmailService {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        transport: Arc<dyn MailTransport>,
        settings: GenerationSettings,
        sender: String,
    ) -> Self {
        Self {
            provider,
            transport,
            settings,
            sender,
        }
    }

    pub async fn generate_email(
        &self,
        request: GenerateEmailRequest,
    ) -> Result<GenerateEmailResponse, EmailError> {
        if request.prompt.trim().is_empty() {
            return Err(EmailError::Validation(PROMPT_REQUIRED));
        }

        if !self.provider.is_configured() {
            return Err(EmailError::Configuration);
        }

        let mut last_error: Option<ProviderError> = None;

        for model in &self.settings.models {
            tracing::info!("Attempting email generation with model '{}'", model);

            let completion = CompletionRequest {
                model: model.clone(),
                messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(request.prompt.as_str())],
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            };

            match self.provider.complete(completion).await {
                Ok(content) if !content.trim().is_empty() => {
                    tracing::info!("Model '{}' generated the email", model);
                    return Ok(GenerateEmailResponse {
                        success: true,
                        email: EmailDraft {
                            subject: subject_or(request.subject, DEFAULT_GENERATED_SUBJECT),
                            content,
                            recipients: request.recipients,
                        },
                        model: model.clone(),
                    });
                }
                Ok(_) => {
                    tracing::warn!("Model '{}' returned no content", model);
                    last_error = Some(ProviderError::without_status("empty completion"));
                }
                Err(e) => {
                    tracing::warn!("Model '{}' failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(EmailError::Generation { last: last_error })
    }

    pub async fn send_email(
        &self,
        request: SendEmailRequest,
    ) -> Result<SendEmailResponse, EmailError> {
        if request.recipients.is_empty() {
            return Err(EmailError::Validation(RECIPIENTS_REQUIRED));
        }

        if request.content.is_empty() {
            return Err(EmailError::Validation(CONTENT_REQUIRED));
        }

        let mail = OutgoingMail {
            from: self.sender.clone(),
            to: request.recipients.join(", "),
            subject: subject_or(request.subject, DEFAULT_SEND_SUBJECT),
            html: to_html(&request.content),
        };

        self.transport.dispatch(&mail).await?;

        let recipient_count = request.recipients.len();

        Ok(SendEmailResponse {
            success: true,
            message: format!("Email sent successfully to {recipient_count} recipient(s)"),
            recipient_count,
        })
    }
}
