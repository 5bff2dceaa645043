//! Landing page

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::health::SERVICE_NAME;
use crate::AppState;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Serve the frontend's index.html, or service info when no frontend is deployed
pub async fn root(State(state): State<AppState>) -> Response {
    let index = state.config.server.static_dir.join("index.html");

    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Json(ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: vec![
                "GET /health".to_string(),
                "POST /api/recommend".to_string(),
            ],
        })
        .into_response(),
    }
}
