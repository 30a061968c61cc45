pub mod catalog;
pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use crate::generation::handlers::handle_generate;
use crate::state::AppState;
use crate::upload::handlers::handle_upload;
use crate::upload::UPLOAD_BODY_LIMIT;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/reason-codes", get(catalog::reason_codes_handler))
        .route(
            "/upload",
            post(handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/generate", post(handle_generate))
        .route("/metrics", get(catalog::metrics_handler))
        .with_state(state)
}

/// Router plus the HTTP middleware stack used in production.
pub fn build_app(state: AppState) -> Result<Router> {
    let cors = build_cors_layer(&state.config.cors_origin)?;
    Ok(build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Allows exactly one front-end origin, any method and header from it, with
/// credentials. Methods and headers are mirrored because wildcards cannot be
/// combined with credentials.
pub fn build_cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("CORS_ORIGIN '{origin}' is not a valid header value"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
