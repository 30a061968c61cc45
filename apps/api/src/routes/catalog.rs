use axum::Json;
use serde::Serialize;

use crate::models::reason_code::{catalog, ReasonCodeOption};

/// GET /reason-codes
pub async fn reason_codes_handler() -> Json<Vec<ReasonCodeOption>> {
    Json(catalog())
}

/// Usage figures for the dashboard. Fixed until an aggregation store exists.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub avg_generation_time_ms: u64,
    pub declines_cleared_this_week: u64,
    pub total_processed: u64,
    pub manual_edits_ratio: f64,
}

impl MetricsSnapshot {
    pub fn placeholder() -> Self {
        MetricsSnapshot {
            avg_generation_time_ms: 3500,
            declines_cleared_this_week: 47,
            total_processed: 234,
            manual_edits_ratio: 0.23,
        }
    }
}

/// GET /metrics
pub async fn metrics_handler() -> Json<MetricsSnapshot> {
    Json(MetricsSnapshot::placeholder())
}
