//! Weather API client for fetching hourly observations
//!
//! Integrates with the Open-Meteo forecast API. Hourly samples are requested
//! for a trailing window with the timezone auto-detected from the coordinate.

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, HourlyObservations};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::WeatherConfig;
use crate::services::cache::TtlCache;

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation";

/// Fetching observations failed.
///
/// Never converted into `AppError`: the weather service turns
/// every one of these into seasonal defaults.
#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("weather API returned status {0}")]
    Status(u16),

    #[error("unreadable weather response: {0}")]
    Decode(String),
}

impl WeatherFetchError {
    /// Worth another attempt: network trouble or a server-side failure
    pub fn is_transient(&self) -> bool {
        match self {
            WeatherFetchError::Transport(_) => true,
            WeatherFetchError::Status(code) => *code >= 500,
            WeatherFetchError::Decode(_) => false,
        }
    }
}

/// Source of hourly weather observations around a coordinate
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn hourly_observations(
        &self,
        coord: Coordinate,
    ) -> Result<HourlyObservations, WeatherFetchError>;
}

/// Open-Meteo forecast client with retry
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    past_days: u32,
    forecast_days: u32,
    timeout: Duration,
    max_retries: u32,
}

/// Open-Meteo response; hourly arrays are aligned by index
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: Option<OpenMeteoHourly>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
}

impl From<OpenMeteoResponse> for HourlyObservations {
    fn from(r: OpenMeteoResponse) -> Self {
        match r.hourly {
            Some(h) => HourlyObservations {
                temperature: h.temperature_2m,
                humidity: h.relative_humidity_2m,
                precipitation: h.precipitation,
            },
            None => HourlyObservations::default(),
        }
    }
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        tracing::info!(
            base_url = %config.base_url,
            past_days = config.past_days,
            forecast_days = config.forecast_days,
            "Weather client initialized"
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            past_days: config.past_days,
            forecast_days: config.forecast_days,
            timeout,
            max_retries: config.max_retries.max(1),
        })
    }

    async fn fetch_once(&self, coord: Coordinate) -> Result<HourlyObservations, WeatherFetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coord.latitude.to_string()),
                ("longitude", coord.longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("past_days", self.past_days.to_string()),
                ("forecast_days", self.forecast_days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherFetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WeatherFetchError::Status(response.status().as_u16()));
        }

        let data: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| WeatherFetchError::Decode(e.to_string()))?;

        Ok(data.into())
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn hourly_observations(
        &self,
        coord: Coordinate,
    ) -> Result<HourlyObservations, WeatherFetchError> {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(200))
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(self.timeout))
            .build();

        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let max_retries = self.max_retries;

        backoff::future::retry(policy, move || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            match self.fetch_once(coord).await {
                Ok(obs) => Ok(obs),
                Err(e) if e.is_transient() && attempt < max_retries => {
                    tracing::debug!(attempt, error = %e, "Weather fetch failed, retrying");
                    Err(backoff::Error::transient(e))
                }
                Err(e) => Err(backoff::Error::permanent(e)),
            }
        })
        .await
    }
}

/// Cache key: coordinates at ~11 m resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordinateKey(i64, i64);

impl From<Coordinate> for CoordinateKey {
    fn from(c: Coordinate) -> Self {
        CoordinateKey(
            (c.latitude * 10_000.0).round() as i64,
            (c.longitude * 10_000.0).round() as i64,
        )
    }
}

/// Read-through TTL cache in front of another weather source.
///
/// Only successful fetches are cached.
pub struct CachedWeatherSource {
    inner: Arc<dyn WeatherSource>,
    cache: TtlCache<CoordinateKey, HourlyObservations>,
}

impl CachedWeatherSource {
    pub fn new(inner: Arc<dyn WeatherSource>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl WeatherSource for CachedWeatherSource {
    async fn hourly_observations(
        &self,
        coord: Coordinate,
    ) -> Result<HourlyObservations, WeatherFetchError> {
        let key = CoordinateKey::from(coord);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(lat = coord.latitude, lon = coord.longitude, "Weather cache hit");
            return Ok(hit);
        }

        let observations = self.inner.hourly_observations(coord).await?;
        self.cache.insert(key, observations.clone());
        Ok(observations)
    }
}
