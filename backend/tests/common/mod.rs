//! Shared fixtures for the integration tests: in-memory geocoder, weather
//! source and classifier doubles plus request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use parking_lot::Mutex;
use serde_json::Value;
use shared::{Coordinate, FeatureVector, HourlyObservations};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crop_recommendation_backend::config::{
    Config, GeocodingConfig, ModelConfig, ServerConfig, WeatherConfig,
};
use crop_recommendation_backend::external::{
    Geocoder, GeocodingError, WeatherFetchError, WeatherSource,
};
use crop_recommendation_backend::ml::{CropClassifier, LabelEncoder, ModelContext, ModelError};
use crop_recommendation_backend::{create_app, AppState};

pub const SOILS: [&str; 3] = ["Alluvial", "Black Soil", "Red Soil"];
pub const SEASONS: [&str; 3] = ["Kharif", "Rabi", "Zayad"];

/// Millet has no entry in the economics table
pub const CROPS: [&str; 5] = ["Banana", "Cotton", "Maize", "Millet", "Rice"];

/// Rice 40%, Cotton 25%, Millet 20%, Banana 10%, Maize 5%
pub const PROBABILITIES: [f64; 5] = [0.10, 0.25, 0.05, 0.20, 0.40];

pub fn nagpur() -> Coordinate {
    Coordinate::new(21.1458, 79.0882)
}

// ============================================================================
// Doubles
// ============================================================================

/// Always returns the same distribution and remembers what it was asked
pub struct FixedClassifier {
    proba: Vec<f64>,
    pub seen: Mutex<Vec<FeatureVector>>,
}

impl FixedClassifier {
    pub fn new(proba: &[f64]) -> Self {
        Self {
            proba: proba.to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl CropClassifier for FixedClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        self.seen.lock().push(*features);
        Ok(self.proba.clone())
    }

    fn n_classes(&self) -> usize {
        self.proba.len()
    }
}

pub struct FailingClassifier;

impl CropClassifier for FailingClassifier {
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Inference("tree 3 has no nodes".to_string()))
    }

    fn n_classes(&self) -> usize {
        CROPS.len()
    }
}

pub struct PanickingClassifier;

impl CropClassifier for PanickingClassifier {
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        panic!("classifier blew up")
    }

    fn n_classes(&self) -> usize {
        CROPS.len()
    }
}

/// Resolves every query to the same place (or to nothing) and records queries
pub struct FixedGeocoder {
    answer: Option<Coordinate>,
    pub queries: Mutex<Vec<String>>,
}

impl FixedGeocoder {
    pub fn found(coord: Coordinate) -> Self {
        Self {
            answer: Some(coord),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn nowhere() -> Self {
        Self {
            answer: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodingError> {
        self.queries.lock().push(query.to_string());
        Ok(self.answer)
    }
}

pub struct DownGeocoder;

#[async_trait]
impl Geocoder for DownGeocoder {
    async fn search(&self, _query: &str) -> Result<Option<Coordinate>, GeocodingError> {
        Err(GeocodingError::Transport("connection refused".to_string()))
    }
}

/// Never answers within any reasonable deadline
pub struct StalledGeocoder;

#[async_trait]
impl Geocoder for StalledGeocoder {
    async fn search(&self, _query: &str) -> Result<Option<Coordinate>, GeocodingError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }
}

pub struct FixedWeather(pub HourlyObservations);

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn hourly_observations(
        &self,
        _coord: Coordinate,
    ) -> Result<HourlyObservations, WeatherFetchError> {
        Ok(self.0.clone())
    }
}

pub struct DownWeather;

#[async_trait]
impl WeatherSource for DownWeather {
    async fn hourly_observations(
        &self,
        _coord: Coordinate,
    ) -> Result<HourlyObservations, WeatherFetchError> {
        Err(WeatherFetchError::Status(503))
    }
}

/// Two hot, humid hours with 1.5 mm of rain in total
pub fn two_hours() -> HourlyObservations {
    HourlyObservations {
        temperature: vec![Some(30.0), Some(31.0)],
        humidity: vec![Some(70.0), Some(80.0)],
        precipitation: vec![Some(0.5), Some(1.0)],
    }
}

// ============================================================================
// App construction
// ============================================================================

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            static_dir: PathBuf::from("tests/fixtures/no-frontend"),
            ..ServerConfig::default()
        },
        model: ModelConfig {
            artifact_dir: PathBuf::from("tests/fixtures/models"),
        },
        geocoding: GeocodingConfig::default(),
        weather: WeatherConfig::default(),
    }
}

fn encoder(classes: &[&str]) -> LabelEncoder {
    LabelEncoder::new(classes.iter().map(|c| c.to_string()).collect()).unwrap()
}

pub fn model_context(classifier: Arc<dyn CropClassifier>) -> Arc<ModelContext> {
    model_context_with(classifier, &SOILS, &SEASONS, &CROPS)
}

pub fn model_context_with(
    classifier: Arc<dyn CropClassifier>,
    soils: &[&str],
    seasons: &[&str],
    crops: &[&str],
) -> Arc<ModelContext> {
    Arc::new(
        ModelContext::new(classifier, encoder(soils), encoder(seasons), encoder(crops)).unwrap(),
    )
}

pub struct TestApp {
    pub router: Router,
    pub classifier: Arc<FixedClassifier>,
    pub geocoder: Arc<FixedGeocoder>,
}

/// The happy-path app: location found, weather observed, fixed distribution
pub fn test_app() -> TestApp {
    test_app_with_weather(Arc::new(FixedWeather(two_hours())))
}

pub fn test_app_with_weather(weather: Arc<dyn WeatherSource>) -> TestApp {
    let classifier = Arc::new(FixedClassifier::new(&PROBABILITIES));
    let geocoder = Arc::new(FixedGeocoder::found(nagpur()));
    let state = AppState::new(
        test_config(),
        model_context(classifier.clone()),
        geocoder.clone(),
        weather,
    );

    TestApp {
        router: create_app(state),
        classifier,
        geocoder,
    }
}

pub fn app_with(
    config: Config,
    classifier: Arc<dyn CropClassifier>,
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
) -> Router {
    create_app(AppState::new(config, model_context(classifier), geocoder, weather))
}

// ============================================================================
// Logs
// ============================================================================

/// Collects formatted log output in memory
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route warn-and-above events on this thread into the capture until the
    /// guard is dropped
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// Requests
// ============================================================================

pub fn farm_request() -> Value {
    serde_json::json!({
        "state": "Maharashtra",
        "district": "Nagpur",
        "village": "Kamptee",
        "soil_type": "black_soil",
        "season": "kharif",
        "nitrogen": 90.0,
        "phosphorus": 42.0,
        "potassium": 43.0,
        "ph": 6.5
    })
}

pub async fn post_json(router: Router, uri: &str, body: &Value) -> Response<Body> {
    post_raw(router, uri, body.to_string()).await
}

pub async fn post_raw(router: Router, uri: &str, body: String) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(router: Router, uri: &str) -> Response<Body> {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    json_body(response).await
}
