use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateEmailRequest {
    /// What the email should say, in plain language
    #[serde(default)]
    pub prompt: String,
    /// Addresses the draft is meant for
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Subject line, "Generated Email" if left out
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailDraft {
    /// Subject line
    pub subject: String,
    /// Drafted body
    pub content: String,
    /// Addresses echoed back from the request
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateEmailResponse {
    pub success: bool,
    pub email: EmailDraft,
    /// Model that produced the draft
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SendEmailRequest {
    /// Addresses to deliver to, all in a single message
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Subject line, "No Subject" if left out
    #[serde(default)]
    pub subject: Option<String>,
    /// Body text; line breaks become `<br>`
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip)]
    pub recipient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
