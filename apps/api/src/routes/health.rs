use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service identity and version.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "NYCT No-Writer MVP API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME")
    }))
}
