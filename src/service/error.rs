use axum::http::StatusCode;

use crate::{provider::ProviderError, transport::TransportError};

pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const RECIPIENTS_REQUIRED: &str = "Recipients are required";
pub const CONTENT_REQUIRED: &str = "Email content is required";

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid request: {0}")]
    Validation(&'static str),

    #[error("AI provider API key is missing or still set to the placeholder value")]
    Configuration,

    #[error("All model candidates failed, last error: {}", .last.as_ref().map_or_else(|| "none".to_string(), ToString::to_string))]
    Generation { last: Option<ProviderError> },

    #[error("Failed to deliver email: {0}")]
    Delivery(#[from] TransportError),
}

impl EmailError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration | Self::Generation { .. } | Self::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the caller; provider and transport details stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => (*message).to_string(),
            Self::Configuration => "AI provider API key is not configured. \
                 Set GROQ_API_KEY to a valid key and restart the server."
                .to_string(),
            Self::Generation { last } => {
                generation_message(last.as_ref().and_then(|e| e.status)).to_string()
            }
            Self::Delivery(_) => "Failed to send email".to_string(),
        }
    }
}

const fn generation_message(status: Option<u16>) -> &'static str {
    match status {
        Some(400) => "Invalid request to AI provider. Please check your prompt.",
        Some(401) => "Invalid AI provider API key. Please check your configuration.",
        Some(429) => "AI provider rate limit exceeded. Please try again later.",
        _ => "Failed to generate email. Please try again later.",
    }
}
