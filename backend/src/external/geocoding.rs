//! Geocoding client for resolving farm locations to coordinates
//!
//! Integrates with the OpenStreetMap Nominatim search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;
use std::time::Duration;
use thiserror::Error;

use crate::config::GeocodingConfig;
use crate::error::{AppError, AppResult};

/// The search endpoint could not be used
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("search returned status {0}")]
    Status(u16),

    #[error("unreadable search response: {0}")]
    Decode(String),
}

impl From<GeocodingError> for AppError {
    fn from(e: GeocodingError) -> Self {
        AppError::GeocodingUnavailable(e.to_string())
    }
}

/// Free-text place search returning at most one match
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodingError>;
}

/// Nominatim search client
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// One Nominatim search result; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        Ok(Coordinate::new(
            parse_degrees("latitude", &self.lat)?,
            parse_degrees("longitude", &self.lon)?,
        ))
    }
}

fn parse_degrees(axis: &str, raw: &str) -> Result<f64, GeocodingError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodingError::Decode(format!("invalid {} '{}'", axis, raw)))
}

impl NominatimClient {
    /// Create a new client; every search is bounded by the configured timeout
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(base_url = %config.base_url, "Geocoding client initialized");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodingError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodingError::Status(response.status().as_u16()));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::Decode(e.to_string()))?;

        places.first().map(NominatimPlace::coordinate).transpose()
    }
}

/// Search query for the full village, district, state triple
pub fn village_query(village: &str, district: &str, state: &str, country: &str) -> String {
    format!("{}, {}, {}, {}", village, district, state, country)
}

/// Broadened query used when the village itself is unknown
pub fn district_query(district: &str, state: &str, country: &str) -> String {
    format!("{}, {}, {}", district, state, country)
}

/// Resolve a farm location, falling back from the village to its district.
///
/// No match for either query is a `LocationNotFound`; a failing search
/// endpoint is `GeocodingUnavailable`.
pub async fn resolve_location(
    geocoder: &dyn Geocoder,
    state: &str,
    district: &str,
    village: &str,
    country: &str,
) -> AppResult<Coordinate> {
    let query = village_query(village, district, state, country);
    if let Some(coord) = geocoder.search(&query).await? {
        tracing::info!(query = %query, lat = coord.latitude, lon = coord.longitude, "Coordinates resolved");
        return Ok(coord);
    }

    let broadened = district_query(district, state, country);
    tracing::debug!(query = %query, fallback = %broadened, "Village not found, broadening search");

    match geocoder.search(&broadened).await? {
        Some(coord) => {
            tracing::info!(query = %broadened, lat = coord.latitude, lon = coord.longitude, "Coordinates resolved from district");
            Ok(coord)
        }
        None => Err(AppError::LocationNotFound(query)),
    }
}
