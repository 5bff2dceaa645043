//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

pub const SERVICE_NAME: &str = "Crop Recommendation System";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub models_loaded: bool,
    pub crop_classes: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let crop_classes = state.models.crop_encoder().len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        // Always true while serving: startup aborts without artifacts
        models_loaded: crop_classes > 0,
        crop_classes,
    })
}
