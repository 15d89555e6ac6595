use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        EmailDraft, ErrorResponse, GenerateEmailRequest, GenerateEmailResponse, SendEmailRequest,
        SendEmailResponse,
    },
    service::{EmailError, EmailService},
};

#[derive(OpenApi)]
#[openapi(
    paths(generate_email, send_email),
    components(schemas(
        GenerateEmailRequest,
        GenerateEmailResponse,
        EmailDraft,
        SendEmailRequest,
        SendEmailResponse,
        ErrorResponse
    )),
    tags(
        (name = "email", description = "AI email drafting and delivery")
    )
)]
pub struct ApiDoc;

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

fn email_error_response(context: &str, e: &EmailError) -> Response {
    match e {
        EmailError::Validation(_) => tracing::warn!("Rejected {context} request: {e}"),
        _ => tracing::error!("Failed to {context} email: {e}"),
    }
    error_response(e.status_code(), e.user_message())
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    tracing::warn!("Malformed request body: {rejection}");
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

#[utoipa::path(
    post,
    path = "/api/email/generate",
    request_body = GenerateEmailRequest,
    responses(
        (status = 200, description = "Draft generated", body = GenerateEmailResponse),
        (status = 400, description = "Prompt missing", body = ErrorResponse),
        (status = 500, description = "Provider not configured or every model failed", body = ErrorResponse)
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn generate_email(
    State(service): State<Arc<EmailService>>,
    payload: Result<Json<GenerateEmailRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.generate_email(payload).await {
        Ok(r) => (StatusCode::OK, Json(r)).into_response(),
        Err(e) => email_error_response("generate", &e),
    }
}

#[utoipa::path(
    post,
    path = "/api/email/send",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email accepted for delivery", body = SendEmailResponse),
        (status = 400, description = "Recipients or content missing", body = ErrorResponse),
        (status = 500, description = "Transport failure", body = ErrorResponse)
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn send_email(
    State(service): State<Arc<EmailService>>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.send_email(payload).await {
        Ok(r) => {
            tracing::info!("Email delivered to {} recipient(s)", r.recipient_count);
            (StatusCode::OK, Json(r)).into_response()
        }
        Err(e) => email_error_response("send", &e),
    }
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from mail drafter!").into_response()
}
