use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{handlers::rest, service::EmailService};

pub fn router(service: Arc<EmailService>) -> Router {
    let api_router = Router::new()
        .route("/email/generate", post(rest::generate_email))
        .route("/email/send", post(rest::send_email));

    Router::new()
        .route("/", get(rest::health_check))
        .nest("/api", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
