//! Crop recommendation pipeline
//!
//! Validate → Normalize → Encode → Geocode → Weather → Assemble → Rank.
//! Every stage before Weather can abort the request with its own error
//! classification; Weather always produces a summary.

use shared::{normalize_label, validate_request, RecommendationRequest, RecommendationResponse};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{geocoding, Geocoder};
use crate::ml::ModelContext;
use crate::services::features::{assemble_features, encode_labels};
use crate::services::ranking::rank_crops;
use crate::services::weather::WeatherService;

/// Log a failed stage with enough context to diagnose it, then pass the
/// error through unchanged
fn stage_failed(stage: &'static str, request: &RecommendationRequest, err: AppError) -> AppError {
    if err.status_code().is_server_error() {
        tracing::error!(
            stage,
            state = %request.state,
            district = %request.district,
            village = %request.village,
            error = %err,
            "Recommendation stage failed"
        );
    } else {
        tracing::warn!(
            stage,
            state = %request.state,
            district = %request.district,
            village = %request.village,
            error = %err,
            "Recommendation stage rejected input"
        );
    }
    err
}

/// Sequences the recommendation pipeline for one request at a time.
///
/// Holds only read-only shared state, so one instance serves all requests.
#[derive(Clone)]
pub struct RecommendationService {
    models: Arc<ModelContext>,
    geocoder: Arc<dyn Geocoder>,
    weather: WeatherService,
    country: String,
}

impl RecommendationService {
    pub fn new(
        models: Arc<ModelContext>,
        geocoder: Arc<dyn Geocoder>,
        weather: WeatherService,
        country: impl Into<String>,
    ) -> Self {
        Self {
            models,
            geocoder,
            weather,
            country: country.into(),
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(state = %request.state, district = %request.district, village = %request.village)
    )]
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        validate_request(&request)
            .map_err(|e| stage_failed("validate", &request, e.into()))?;

        let soil_label = normalize_label(&request.soil_type);
        let season_label = normalize_label(&request.season);
        tracing::debug!(soil = %soil_label, season = %season_label, "Labels normalized");

        let labels = encode_labels(&self.models, &soil_label, &season_label)
            .map_err(|e| stage_failed("encode", &request, e))?;

        let coord = geocoding::resolve_location(
            self.geocoder.as_ref(),
            &request.state,
            &request.district,
            &request.village,
            &self.country,
        )
        .await
        .map_err(|e| stage_failed("geocode", &request, e))?;

        let weather = self.weather.summarize(coord, &season_label).await;

        let features = assemble_features(&request, &weather, labels);
        tracing::debug!(features = ?features.as_slice(), "Features assembled");

        let recommendations = rank_crops(&self.models, &features)
            .map_err(|e| stage_failed("rank", &request, AppError::Model(e)))?;

        if let Some(top) = recommendations.first() {
            tracing::info!(top_crop = %top.crop, accuracy = top.accuracy, "Recommendation produced");
        }

        Ok(RecommendationResponse {
            state: request.state,
            district: request.district,
            village: request.village,
            temperature: weather.avg_temperature,
            humidity: weather.avg_humidity,
            rainfall: weather.effective_rainfall,
            recommendations,
        })
    }
}
