//! HTTP handlers for crop recommendation endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared::{RecommendationRequest, RecommendationResponse};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Recommend the top crops for a farm
pub async fn recommend_crop(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "Recommendation body rejected");
        AppError::Validation {
            field: "body".to_string(),
            message: e.body_text(),
        }
    })?;

    let response = state.recommender.recommend(request).await?;
    Ok(Json(response))
}
