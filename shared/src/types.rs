//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Geographic coordinates resolved for a farm location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Number of columns the classifier was trained on
pub const FEATURE_COUNT: usize = 9;

/// Ordered feature vector consumed by the classifier.
///
/// Columns, in training order: nitrogen, phosphorus, potassium, ph,
/// temperature, humidity, rainfall, soil code, season code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        ph: f64,
        temperature: f64,
        humidity: f64,
        rainfall: f64,
        soil_code: usize,
        season_code: usize,
    ) -> Self {
        Self([
            nitrogen,
            phosphorus,
            potassium,
            ph,
            temperature,
            humidity,
            rainfall,
            soil_code as f64,
            season_code as f64,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Round to two decimal places, the precision used for every reported figure
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
