//! Business logic services for the Crop Recommendation System

pub mod cache;
pub mod features;
pub mod ranking;
pub mod recommendation;
pub mod weather;

pub use recommendation::RecommendationService;
pub use weather::WeatherService;
