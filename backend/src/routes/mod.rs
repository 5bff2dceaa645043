//! Route definitions for the Crop Recommendation System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create public routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/recommend", post(handlers::recommend_crop))
}
