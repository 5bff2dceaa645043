//! Agricultural seasons and their climate assumptions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum rainfall (mm) assumed for a season outside the known vocabulary
pub const DEFAULT_RAINFALL_FLOOR: f64 = 25.0;

/// Indian cropping seasons with known climate assumptions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    Kharif,
    Rabi,
    Zayad,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zayad];

    /// Match a normalized label (`Kharif`, `Rabi`, `Zayad`) exactly
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Kharif" => Some(Season::Kharif),
            "Rabi" => Some(Season::Rabi),
            "Zayad" => Some(Season::Zayad),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zayad => "Zayad",
        }
    }

    /// Minimum rainfall (mm) assumed for the season
    pub fn rainfall_floor(&self) -> f64 {
        match self {
            Season::Kharif => 80.0,
            Season::Rabi => 20.0,
            Season::Zayad => 30.0,
        }
    }

    /// Typical conditions used when live weather cannot be fetched
    pub fn typical_climate(&self) -> SeasonalClimate {
        match self {
            Season::Kharif => SeasonalClimate::new(28.0, 75.0, 120.0),
            Season::Rabi => SeasonalClimate::new(22.0, 55.0, 35.0),
            Season::Zayad => SeasonalClimate::new(32.0, 45.0, 40.0),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static temperature / humidity / rainfall triple for a season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeasonalClimate {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl SeasonalClimate {
    pub const fn new(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
        }
    }
}

/// Rainfall floor for a normalized season label
pub fn seasonal_rainfall_floor(season_label: &str) -> f64 {
    Season::from_label(season_label)
        .map(|s| s.rainfall_floor())
        .unwrap_or(DEFAULT_RAINFALL_FLOOR)
}

/// Fallback climate for a normalized season label
pub fn seasonal_fallback_climate(season_label: &str) -> SeasonalClimate {
    Season::from_label(season_label)
        .map(|s| s.typical_climate())
        .unwrap_or(SeasonalClimate::new(25.0, 65.0, 80.0))
}

/// Raise observed rainfall to the seasonal floor; never lowers it
pub fn apply_rainfall_floor(observed_mm: f64, season_label: &str) -> f64 {
    observed_mm.max(seasonal_rainfall_floor(season_label))
}
