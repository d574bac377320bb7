//! Spherical-earth distance, bearing and destination formulas.
//!
//! All functions treat the Earth as a sphere of radius [`EARTH_RADIUS_KM`].
//! Bearings are compass degrees measured clockwise from true north and are
//! always reported in `[0, 360)`.

use crate::GeoPoint;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two points in kilometers.
///
/// Uses the Haversine formula. The intermediate haversine term is clamped
/// into `[0, 1]` so rounding near antipodal points never leaves the domain
/// of the square root.
///
/// # Example
/// ```
/// use seaway_geo::{distance, GeoPoint};
///
/// let bucks_harbour = GeoPoint::new(44.3367, -68.7425);
/// let somes_sound = GeoPoint::new(44.3333, -68.3117);
///
/// let km = distance(&bucks_harbour, &somes_sound);
/// assert!((km - 34.3).abs() < 0.5);
/// ```
#[inline]
pub fn distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculates the forward azimuth from `from` to `to`.
///
/// Returns compass degrees in `[0, 360)`. Coincident points have no defined
/// direction and yield `0.0`.
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_bearing(x.atan2(y).to_degrees())
}

/// Returns the point reached by travelling `distance_km` from `start` along
/// the great circle leaving at `bearing_deg`.
///
/// The result longitude is wrapped into `[-180, 180)` and the latitude is
/// clamped into `[-90, 90]`.
pub fn destination(start: &GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let (lat1, lon1) = start.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let sin_lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    GeoPoint::new(
        lat2.to_degrees().clamp(-90.0, 90.0),
        normalize_longitude(lon2.to_degrees()),
    )
}

/// Wraps a longitude in degrees into `[-180, 180)`.
#[inline]
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_bearing(bearing: f64) -> f64 {
    let wrapped = bearing.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
