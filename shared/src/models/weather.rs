//! Weather data models

use serde::{Deserialize, Serialize};

/// Where a weather summary came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherOrigin {
    /// Aggregated from live hourly observations
    Observed,
    /// Static seasonal defaults, the weather API could not be reached
    SeasonalFallback,
}

/// Scalar weather summary fed into the feature vector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    /// `max(observed_rainfall, seasonal_floor)`
    pub effective_rainfall: f64,
    pub origin: WeatherOrigin,
}

/// Hourly samples aligned by index; `None` marks a missing sample
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlyObservations {
    pub temperature: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
}

impl HourlyObservations {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty() && self.humidity.is_empty() && self.precipitation.is_empty()
    }
}
