//! Geodesic utilities for nautical passage planning.
//!
//! This crate provides:
//! - Great-circle distance, initial bearing and destination point
//! - Passage refinement (densifying sparse waypoint lists)
//! - Normalization of sailing-directions coordinate notations (DMS, DDM)
//! - Batch processing with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use seaway_geo::{refine_passage, GeoPoint};
//!
//! let bucks_harbour = GeoPoint::new(44.3367, -68.7425);
//! let somes_sound = GeoPoint::new(44.3333, -68.3117);
//!
//! let refined = refine_passage(&[bucks_harbour, somes_sound], 10.0).unwrap();
//! assert_eq!(refined.len(), 5);
//! assert_eq!(refined.first(), Some(&bucks_harbour));
//! assert_eq!(refined.last(), Some(&somes_sound));
//! ```

mod error;
mod great_circle;
pub mod batch;
pub mod coordinates;
pub mod passage;

#[cfg(feature = "wasm")]
mod wasm;

pub use coordinates::{
    parse_coordinate, CoordinateNormalizer, CoordinateToken, Hemisphere, LenientBatch,
    NamedCoordinate, NormalizationFailure, NormalizationOutcome, Notation, ParsedCoordinate,
};
pub use error::{GeoError, GeoErrorCode, Result};
pub use great_circle::{
    destination, distance, initial_bearing, normalize_bearing, normalize_longitude,
    EARTH_RADIUS_KM,
};
pub use passage::{
    refine_cartesian, refine_passage, BearingMode, PassageRefiner, RefinedPassage, DEDUP_TOLERANCE_KM,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic position in decimal degrees.
///
/// Serializes as `{"lat": .., "lon": ..}`, the point shape used by the
/// downstream geospatial index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point without range validation.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a new point, rejecting values outside the geographic range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let raw = format!("{latitude}, {longitude}");
        Axis::Latitude.check(latitude, &raw)?;
        Axis::Longitude.check(longitude, &raw)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Returns true if the point has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        Axis::Latitude.contains(self.latitude) && Axis::Longitude.contains(self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.latitude, point.longitude]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value allowed on this axis, in degrees.
    pub const fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Returns true if `value` lies within the closed range of this axis.
    #[inline]
    pub fn contains(self, value: f64) -> bool {
        (-self.limit()..=self.limit()).contains(&value)
    }

    pub(crate) fn check(self, value: f64, raw: &str) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(GeoError::Range {
                axis: self,
                value,
                raw: raw.to_string(),
                feature: None,
            })
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Latitude => "Latitude",
            Axis::Longitude => "Longitude",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = GeoPoint::new(44.3367, -68.7425);
        assert_eq!(point.latitude, 44.3367);
        assert_eq!(point.longitude, -68.7425);
    }

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(GeoPoint::try_new(44.0, -68.0).is_ok());
        let err = GeoPoint::try_new(95.0, 0.0).unwrap_err();
        assert!(matches!(err, GeoError::Range { axis: Axis::Latitude, value, .. } if value == 95.0));
        let err = GeoPoint::try_new(0.0, -180.5).unwrap_err();
        assert!(matches!(err, GeoError::Range { axis: Axis::Longitude, .. }));
    }

    #[test]
    fn test_point_conversions() {
        let point: GeoPoint = (44.3367, -68.7425).into();
        let pair: [f64; 2] = point.into();
        assert_eq!(pair, [44.3367, -68.7425]);
        assert_eq!(GeoPoint::from(pair), point);
    }

    #[test]
    fn test_point_serializes_as_geo_point() {
        let json = serde_json::to_value(GeoPoint::new(44.297, -68.3)).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 44.297, "lon": -68.3}));
    }
}
