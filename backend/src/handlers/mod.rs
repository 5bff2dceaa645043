//! HTTP handlers for the Crop Recommendation System

pub mod health;
pub mod recommendation;
pub mod root;

pub use health::health_check;
pub use recommendation::recommend_crop;
pub use root::root;
