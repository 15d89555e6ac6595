mod config;
mod dto;
mod handlers;
mod provider;
mod routes;
mod service;
#[cfg(test)]
mod testing;
mod transport;

use std::sync::Arc;

use provider::{CompletionProvider, GroqClient};
use service::{EmailService, GenerationSettings};
use transport::SmtpMailer;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!("Successfully loaded mail drafter config");
    tracing::info!("Model candidates: {:?}", cfg.provider.models);

    // Provider and transport are built once and shared read-only
    let provider = GroqClient::new(&cfg.provider);
    if !provider.is_configured() {
        tracing::warn!("GROQ_API_KEY is not set; generation requests will fail until it is");
    }

    let mailer = match &cfg.smtp {
        Some(smtp) => SmtpMailer::new(smtp).unwrap_or_else(|e| {
            tracing::error!("Failed to set up SMTP transport: {e}");
            panic!("failed to set up SMTP transport: {e}");
        }),
        None => {
            tracing::warn!("SMTP settings are not set; send requests will fail until they are");
            SmtpMailer::unconfigured()
        }
    };
    let sender = cfg
        .smtp
        .as_ref()
        .map(|smtp| smtp.sender().to_string())
        .unwrap_or_default();

    // Setup service
    let service = EmailService::new(
        Arc::new(provider),
        Arc::new(mailer),
        GenerationSettings::new(cfg.provider.models.clone()),
        sender,
    );

    let router = routes::router(Arc::new(service));

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tracing::info!("Mail drafter starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
