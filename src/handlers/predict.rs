//! Predict handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::logic::ClassificationResult;
use crate::models::PredictRequest;
use crate::{AppResult, AppState};

/// Classify one SMS
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<ClassificationResult>> {
    let Json(req) = payload?;
    let input = req.into_input()?;

    let result = state
        .pipeline
        .evaluate(&input.message, &input.sender, input.identifier.as_deref())
        .await?;

    tracing::debug!(
        "Final response: category={}, prediction={}",
        result.category(),
        result.risk().map(|r| r.as_str()).unwrap_or("-")
    );

    Ok(Json(result))
}
