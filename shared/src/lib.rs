//! Shared types and models for the Crop Recommendation System
//!
//! This crate contains types shared between the backend, the browser form
//! (via WASM), and other components of the system.

pub mod models;
pub mod normalize;
pub mod types;
pub mod validation;

pub use models::*;
pub use normalize::*;
pub use types::*;
pub use validation::*;
