//! Domain models for the Crop Recommendation System

mod economics;
mod recommendation;
mod request;
mod season;
mod weather;

pub use economics::*;
pub use recommendation::*;
pub use request::*;
pub use season::*;
pub use weather::*;
