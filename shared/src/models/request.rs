//! Incoming recommendation request

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A farm location plus soil and nutrient readings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(custom = "validate_not_blank")]
    pub state: String,
    #[validate(custom = "validate_not_blank")]
    pub district: String,
    #[validate(custom = "validate_not_blank")]
    pub village: String,

    /// Free-form soil label, e.g. `black_soil`
    pub soil_type: String,
    /// Free-form season label, e.g. `kharif`
    pub season: String,

    #[validate(range(min = 0.0, message = "nitrogen cannot be negative"))]
    pub nitrogen: f64,
    #[validate(range(min = 0.0, message = "phosphorus cannot be negative"))]
    pub phosphorus: f64,
    #[validate(range(min = 0.0, message = "potassium cannot be negative"))]
    pub potassium: f64,
    #[validate(range(min = 0.0, max = 14.0, message = "ph must be between 0 and 14"))]
    pub ph: f64,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}
