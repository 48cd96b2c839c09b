//! Geographic points and great-circle distance.

use serde::{Deserialize, Serialize};

/// Earth radius used for all distance calculations, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic point (lat/lon) in degrees.
///
/// No range validation is applied; out-of-range values are carried through
/// the distance formula unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance in kilometers between two lat/lon pairs.
///
/// The arithmetic order is fixed so results match reference outputs
/// bit-for-bit at two-decimal precision. Pathological inputs (far outside
/// the valid lat/lon ranges) can drive `a` negative, in which case the
/// result is NaN.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Round a distance to two decimal places.
///
/// Rounds the exact binary value through its decimal representation.
/// Scaling by 100 first is not equivalent: `0.015 * 100.0` is exactly 1.5,
/// while 0.015 itself is stored just below the midpoint.
pub fn round_km(distance: f64) -> f64 {
    format!("{:.2}", distance).parse().unwrap_or(distance)
}
