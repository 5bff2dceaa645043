//! Configuration management for the Crop Recommendation System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact configuration
    pub model: ModelConfig,

    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Whole-request deadline in seconds
    pub request_timeout_secs: u64,

    /// Directory holding the browser frontend (index.html and assets)
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Directory containing crop_model.json and the three encoder files
    pub artifact_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim-compatible search endpoint
    pub base_url: String,

    /// User-Agent sent with every search (required by Nominatim's usage policy)
    pub user_agent: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// Country appended to every search query
    pub country: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo-compatible forecast endpoint
    pub base_url: String,

    /// Days of history before today included in the window
    pub past_days: u32,

    /// Days of forecast included in the window (1 = today only)
    pub forecast_days: u32,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// How long a fetched window stays cached, in seconds
    pub cache_ttl_secs: u64,

    /// Attempts per fetch including the first one
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.static_dir", "static")?
            .set_default("model.artifact_dir", "backend/ml/models")?
            .set_default(
                "geocoding.base_url",
                "https://nominatim.openstreetmap.org/search",
            )?
            .set_default("geocoding.user_agent", "Crop-Recommendation-System")?
            .set_default("geocoding.timeout_secs", 10)?
            .set_default("geocoding.country", "India")?
            .set_default("weather.base_url", "https://api.open-meteo.com/v1/forecast")?
            .set_default("weather.past_days", 7)?
            .set_default("weather.forecast_days", 1)?
            .set_default("weather.timeout_secs", 10)?
            .set_default("weather.cache_ttl_secs", 3600)?
            .set_default("weather.max_retries", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the external APIs or the server cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.geocoding.timeout_secs == 0 || self.weather.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "outbound timeouts must be greater than 0".into(),
            ));
        }
        // Open-Meteo limits
        if self.weather.past_days > 92 {
            return Err(ConfigError::Message(
                "weather.past_days must be at most 92".into(),
            ));
        }
        if self.weather.forecast_days > 16 {
            return Err(ConfigError::Message(
                "weather.forecast_days must be at most 16".into(),
            ));
        }
        if self.weather.past_days == 0 && self.weather.forecast_days == 0 {
            return Err(ConfigError::Message(
                "weather window must cover at least one day".into(),
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            request_timeout_secs: 30,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "Crop-Recommendation-System".to_string(),
            timeout_secs: 10,
            country: "India".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            past_days: 7,
            forecast_days: 1,
            timeout_secs: 10,
            cache_ttl_secs: 3600,
            max_retries: 5,
        }
    }
}
