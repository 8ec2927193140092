//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    model: &'static str,
    model_features: usize,
    directory_entries: usize,
    breach_lookup_configured: bool,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = &state.pipeline;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        model: pipeline.classifier().model_kind(),
        model_features: pipeline.classifier().feature_count(),
        directory_entries: pipeline.directory().len(),
        breach_lookup_configured: pipeline.breach_lookup_configured(),
    })
}
