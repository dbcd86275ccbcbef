use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in degrees, serialized as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat(pub f64, pub f64);

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self(lng, lat)
    }

    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self(lng, lat)
    }
}

/// Great-circle distance in kilometers between two points (haversine).
///
/// Inputs are not validated; NaN or out-of-range degrees produce whatever the
/// arithmetic yields.
pub fn haversine_km(start: LngLat, end: LngLat) -> f64 {
    let d_lat = (end.lat() - start.lat()).to_radians();
    let d_lng = (end.lng() - start.lng()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + start.lat().to_radians().cos()
            * end.lat().to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
