//! Recommendation response models

use serde::{Deserialize, Serialize};

use super::economics::CropEconomics;
use crate::types::round2;

/// Number of crops returned per request
pub const TOP_K: usize = 3;

/// One ranked crop with its economic estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub crop: String,
    /// Predicted probability as a percentage, two decimals
    pub accuracy: f64,
    pub expected_cost: i64,
    pub expected_returns: i64,
}

impl Recommendation {
    pub fn new(crop: String, probability: f64, economics: CropEconomics) -> Self {
        Self {
            crop,
            accuracy: round2(probability * 100.0),
            expected_cost: economics.cost,
            expected_returns: economics.returns,
        }
    }
}

/// Response body of `POST /api/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub state: String,
    pub district: String,
    pub village: String,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub recommendations: Vec<Recommendation>,
}
