use serde::{Deserialize, Serialize};

const R_EARTH_M: f64 = 6_371_000.0;
const EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        is_zero(self.lat - other.lat) && is_zero(self.lng - other.lng)
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    fn from(c: Coordinates) -> Self {
        geo_types::coord! { x: c.lng, y: c.lat }
    }
}

impl From<Coordinates> for geo_types::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo_types::Point::new(c.lng, c.lat)
    }
}

#[inline]
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Great-circle distance in meters (haversine).
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lat2) = (from.lat.to_radians(), to.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // rounding can push `a` just outside [0, 1]
    let a = a.clamp(0.0, 1.0);
    let theta = 2.0 * a.sqrt().asin();
    R_EARTH_M * theta
}
