//! Validation utilities for recommendation requests

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::RecommendationRequest;

/// First failing field of a request, in a form suitable for a 400 response
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct RequestValidationError {
    pub field: String,
    pub message: String,
}

impl From<ValidationErrors> for RequestValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.into_iter().collect();
        // HashMap order is random; report the same field every time
        fields.sort_by_key(|(field, _)| *field);

        fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|e| RequestValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .unwrap_or_else(|| RequestValidationError {
                field: "request".to_string(),
                message: "invalid request".to_string(),
            })
    }
}

/// Validate location fields and nutrient ranges.
///
/// Soil and season labels are not checked here; whether they are known is
/// decided by the fitted encoders.
pub fn validate_request(request: &RecommendationRequest) -> Result<(), RequestValidationError> {
    request.validate().map_err(RequestValidationError::from)
}
