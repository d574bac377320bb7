//! WASM bindings for the geo crate.
//!
//! These bindings let the browser map view densify passages and normalize
//! coordinates without a round trip to the server.

use crate::{distance as great_circle_distance, CoordinateNormalizer, CoordinateToken, GeoPoint, Notation, PassageRefiner};
use wasm_bindgen::prelude::*;

/// Calculate the great-circle distance between two points.
///
/// # Returns
/// Distance in kilometers
#[wasm_bindgen]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    great_circle_distance(&GeoPoint::new(lat1, lon1), &GeoPoint::new(lat2, lon2))
}

/// Refine a passage given as a JSON array of `[lat, lon]` pairs.
///
/// # Returns
/// JSON array of `[lat, lon]` pairs for the densified passage
#[wasm_bindgen]
pub fn refine_passage_json(waypoints_json: &str, spacing_km: f64) -> Result<String, JsValue> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(waypoints_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let waypoints: Vec<GeoPoint> = pairs.into_iter().map(GeoPoint::from).collect();

    let refiner = PassageRefiner::new(spacing_km).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let refined = refiner.refine(&waypoints);

    serde_json::to_string(&refined)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Leniently normalize a JSON array of `{"name", "coords"}` candidates.
///
/// # Returns
/// JSON object with `successes` and `failures`
#[wasm_bindgen]
pub fn normalize_coordinates_json(candidates_json: &str, notation: &str) -> Result<String, JsValue> {
    let tokens: Vec<CoordinateToken> = serde_json::from_str(candidates_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let notation: Notation = notation.parse().map_err(|e: crate::GeoError| JsValue::from_str(&e.to_string()))?;

    let batch = CoordinateNormalizer::new(notation).normalize_lenient(&tokens);

    serde_json::to_string(&batch)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
