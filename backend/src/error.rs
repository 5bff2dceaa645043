//! Error handling for the Crop Recommendation System
//!
//! Every failure that can reach a client maps to exactly one status code.
//! Weather failures are absent on purpose: they are absorbed by seasonal
//! fallbacks in the weather service and never become an `AppError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::RequestValidationError;
use thiserror::Error;

use crate::ml::ModelError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("Invalid {field}: '{label}' is not a recognized value")]
    InvalidLabel {
        field: &'static str,
        label: String,
        expected: Vec<String>,
    },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    // External service errors
    #[error("Geocoding service unavailable: {0}")]
    GeocodingUnavailable(String),

    // Server errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidLabel { .. } | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::GeocodingUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Model(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidLabel { .. } => "INVALID_LABEL",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            AppError::GeocodingUnavailable(_) => "GEOCODING_UNAVAILABLE",
            AppError::Model(_) => "MODEL_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn to_detail(&self) -> ErrorResponse {
        let (detail, field) = match self {
            AppError::InvalidLabel {
                field,
                label,
                expected,
            } => (
                format!(
                    "Invalid {}: '{}'. Expected one of: {}",
                    field,
                    label,
                    expected.join(", ")
                ),
                Some(field.to_string()),
            ),
            AppError::Validation { field, message } => (
                format!("Invalid {}: {}", field, message),
                Some(field.clone()),
            ),
            AppError::LocationNotFound(_) => ("Location not found".to_string(), None),
            AppError::GeocodingUnavailable(_) => (
                "Geocoding service is temporarily unavailable".to_string(),
                None,
            ),
            // Don't leak internal error details
            AppError::Model(_) | AppError::Internal(_) => {
                ("An unexpected error occurred".to_string(), None)
            }
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            detail,
            field,
        }
    }
}

impl From<RequestValidationError> for AppError {
    fn from(e: RequestValidationError) -> Self {
        AppError::Validation {
            field: e.field,
            message: e.message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Logged at warn/error where the failure is raised, with its context
        tracing::debug!(status = status.as_u16(), code = self.error_code(), "Error response");

        (status, Json(self.to_detail())).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::InvalidLabel {
                    field: "soil_type",
                    label: "Lava Rock".into(),
                    expected: vec![],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Validation {
                    field: "ph".into(),
                    message: "out of range".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::LocationNotFound("Nowhere, India".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::GeocodingUnavailable("timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Model(ModelError::Inference("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{:?}", err);
        }
    }

    #[test]
    fn test_invalid_label_names_field() {
        let err = AppError::InvalidLabel {
            field: "soil_type",
            label: "Lava Rock".into(),
            expected: vec!["Black Soil".into(), "Red Soil".into()],
        };
        let body = err.to_detail();
        assert_eq!(body.code, "INVALID_LABEL");
        assert_eq!(body.field.as_deref(), Some("soil_type"));
        assert!(body.detail.contains("soil_type"));
        assert!(body.detail.contains("Lava Rock"));
        assert!(body.detail.contains("Black Soil, Red Soil"));
    }

    #[test]
    fn test_server_errors_are_generic() {
        let err = AppError::Model(ModelError::Inference("matrix shape mismatch".into()));
        let body = err.to_detail();
        assert_eq!(body.detail, "An unexpected error occurred");
        assert!(!body.detail.contains("matrix"));
        assert!(body.field.is_none());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: AppError = RequestValidationError {
            field: "village".into(),
            message: "must not be empty".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_detail().field.as_deref(), Some("village"));
    }
}
