//! External API integrations

pub mod geocoding;
pub mod weather;

pub use geocoding::{Geocoder, GeocodingError, NominatimClient};
pub use weather::{CachedWeatherSource, OpenMeteoClient, WeatherFetchError, WeatherSource};
