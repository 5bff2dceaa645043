//! WebAssembly module for the Crop Recommendation System
//!
//! Lets the browser form check input before it is posted:
//! - Soil and season label normalization
//! - Seasonal rainfall floors
//! - Request validation
//! - Crop economics lookup

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::normalize::*;
pub use shared::validation::*;

/// Normalize a free-form soil or season label, e.g. `black_soil` -> `Black Soil`
#[wasm_bindgen(js_name = normalizeLabel)]
pub fn normalize(raw: &str) -> String {
    normalize_label(raw)
}

/// Minimum rainfall (mm) the server will assume for a season label
#[wasm_bindgen(js_name = rainfallFloor)]
pub fn rainfall_floor(season: &str) -> f64 {
    seasonal_rainfall_floor(&normalize_label(season))
}

/// Season names the form should offer
#[wasm_bindgen(js_name = seasonNames)]
pub fn season_names() -> js_sys::Array {
    Season::ALL
        .iter()
        .map(|s| JsValue::from_str(s.label()))
        .collect()
}

/// Validate a request body before posting it.
///
/// Throws a `"field: message"` string on the first problem found.
#[wasm_bindgen(js_name = validateRequest)]
pub fn validate_request_js(request_json: &str) -> Result<(), JsValue> {
    check_request(request_json).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e));
        JsValue::from_str(&e)
    })
}

/// Expected `{cost, returns}` for a crop, as JSON
#[wasm_bindgen(js_name = cropEconomics)]
pub fn crop_economics(crop: &str) -> String {
    economics_json(crop)
}

fn check_request(request_json: &str) -> Result<(), String> {
    let request: RecommendationRequest =
        serde_json::from_str(request_json).map_err(|e| format!("body: {}", e))?;
    validate_request(&request).map_err(|e| format!("{}: {}", e.field, e.message))
}

fn economics_json(crop: &str) -> String {
    let economics = economics_or_default(crop);
    serde_json::to_string(&economics)
        .unwrap_or_else(|_| format!("{{\"cost\":{},\"returns\":{}}}", economics.cost, economics.returns))
}
