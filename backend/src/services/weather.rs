//! Weather service: turns hourly observations into the scalar summary the
//! classifier expects.
//!
//! Weather is advisory. When observations cannot be fetched the service
//! answers with seasonal defaults instead of failing the request.

use shared::{
    apply_rainfall_floor, round2, seasonal_fallback_climate, Coordinate, HourlyObservations,
    WeatherOrigin, WeatherSummary,
};
use std::sync::Arc;

use crate::external::WeatherSource;

/// Used when no temperature sample is present
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Used when no humidity sample is present
pub const DEFAULT_HUMIDITY: f64 = 65.0;

/// Observed rainfall when no precipitation sample is present, before the floor
pub const DEFAULT_RAINFALL: f64 = 0.0;

fn present(samples: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    samples.iter().flatten().copied().filter(|v| v.is_finite())
}

fn mean(samples: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = present(samples).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

fn total(samples: &[Option<f64>]) -> Option<f64> {
    let mut values = present(samples).peekable();
    values.peek()?;
    Some(values.sum())
}

/// Aggregate hourly samples and apply the seasonal rainfall floor
pub fn aggregate_observations(obs: &HourlyObservations, season_label: &str) -> WeatherSummary {
    let avg_temperature = round2(mean(&obs.temperature).unwrap_or(DEFAULT_TEMPERATURE));
    let avg_humidity = round2(mean(&obs.humidity).unwrap_or(DEFAULT_HUMIDITY));
    let observed_rainfall = round2(total(&obs.precipitation).unwrap_or(DEFAULT_RAINFALL));

    WeatherSummary {
        avg_temperature,
        avg_humidity,
        effective_rainfall: apply_rainfall_floor(observed_rainfall, season_label),
        origin: WeatherOrigin::Observed,
    }
}

/// Static seasonal conditions used when the weather API is unreachable
pub fn fallback_summary(season_label: &str) -> WeatherSummary {
    let climate = seasonal_fallback_climate(season_label);
    WeatherSummary {
        avg_temperature: climate.temperature,
        avg_humidity: climate.humidity,
        effective_rainfall: apply_rainfall_floor(climate.rainfall, season_label),
        origin: WeatherOrigin::SeasonalFallback,
    }
}

/// Weather service for summarizing conditions at a farm
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Summarize recent weather; never fails
    pub async fn summarize(&self, coord: Coordinate, season_label: &str) -> WeatherSummary {
        let summary = match self.source.hourly_observations(coord).await {
            Ok(obs) => aggregate_observations(&obs, season_label),
            Err(e) => {
                tracing::warn!(
                    lat = coord.latitude,
                    lon = coord.longitude,
                    season = season_label,
                    error = %e,
                    "Weather unavailable, using seasonal defaults"
                );
                fallback_summary(season_label)
            }
        };

        tracing::info!(
            temperature = summary.avg_temperature,
            humidity = summary.avg_humidity,
            rainfall = summary.effective_rainfall,
            origin = ?summary.origin,
            "Weather summarized"
        );

        summary
    }
}
