//! Feature assembly: categorical encoding and the ordered feature vector

use shared::{FeatureVector, RecommendationRequest, WeatherSummary};

use crate::error::{AppError, AppResult};
use crate::ml::{LabelEncoder, ModelContext, ModelError};

/// Training-time codes for the two categorical inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedLabels {
    pub soil_code: usize,
    pub season_code: usize,
}

/// Encode one normalized label.
///
/// An unknown label is the caller's data problem and becomes a 400 naming
/// `field`; anything else the encoder reports is a model fault.
fn encode_field(encoder: &LabelEncoder, field: &'static str, label: &str) -> AppResult<usize> {
    encoder.encode(label).map_err(|e| match e {
        ModelError::UnknownLabel(label) => AppError::InvalidLabel {
            field,
            label,
            expected: encoder.classes().to_vec(),
        },
        other => AppError::Model(other),
    })
}

/// Encode normalized soil and season labels with the fitted encoders
pub fn encode_labels(
    models: &ModelContext,
    soil_label: &str,
    season_label: &str,
) -> AppResult<EncodedLabels> {
    Ok(EncodedLabels {
        soil_code: encode_field(models.soil_encoder(), "soil_type", soil_label)?,
        season_code: encode_field(models.season_encoder(), "season", season_label)?,
    })
}

/// Build the feature vector in training column order
pub fn assemble_features(
    request: &RecommendationRequest,
    weather: &WeatherSummary,
    labels: EncodedLabels,
) -> FeatureVector {
    FeatureVector::new(
        request.nitrogen,
        request.phosphorus,
        request.potassium,
        request.ph,
        weather.avg_temperature,
        weather.avg_humidity,
        weather.effective_rainfall,
        labels.soil_code,
        labels.season_code,
    )
}
