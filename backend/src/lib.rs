//! Crop Recommendation System - Backend
//!
//! Resolves a farm location, enriches soil readings with recent weather and
//! ranks crops with a pre-trained classifier.

use axum::{
    http::HeaderName,
    response::{IntoResponse, Response},
    Router,
};
use std::{any::Any, sync::Arc, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod ml;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppError;
use external::{CachedWeatherSource, Geocoder, NominatimClient, OpenMeteoClient, WeatherSource};
use ml::ModelContext;
use services::{RecommendationService, WeatherService};

/// Application state shared across handlers.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub models: Arc<ModelContext>,
    pub recommender: Arc<RecommendationService>,
}

impl AppState {
    /// Wire the pipeline from explicitly provided collaborators
    pub fn new(
        config: Config,
        models: Arc<ModelContext>,
        geocoder: Arc<dyn Geocoder>,
        weather_source: Arc<dyn WeatherSource>,
    ) -> Self {
        let recommender = RecommendationService::new(
            models.clone(),
            geocoder,
            WeatherService::new(weather_source),
            config.geocoding.country.clone(),
        );

        Self {
            config: Arc::new(config),
            models,
            recommender: Arc::new(recommender),
        }
    }

    /// Load model artifacts and build the real API clients.
    ///
    /// Fails if any artifact is missing or malformed.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let models = Arc::new(ModelContext::load(&config.model.artifact_dir)?);

        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimClient::new(&config.geocoding)?);
        let weather: Arc<dyn WeatherSource> = Arc::new(CachedWeatherSource::new(
            Arc::new(OpenMeteoClient::new(&config.weather)?),
            Duration::from_secs(config.weather.cache_ttl_secs),
        ));

        Ok(Self::new(config, models, geocoder, weather))
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::public_routes())
        .nest("/api", routes::api_routes())
        .nest_service("/static", ServeDir::new(&state.config.server.static_dir))
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %message, "Handler panicked");

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", message)).into_response()
}
