use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }

    /// Great-circle distance in miles (haversine).
    pub fn distance_miles(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

/// Radius filter over an optional game coordinate. A radius of zero (or less)
/// means unlimited, and a game without a coordinate is never excluded by
/// distance.
pub fn within_radius(game: Option<&Coordinate>, origin: &Coordinate, radius_miles: f64) -> bool {
    if radius_miles <= 0.0 {
        return true;
    }
    match game {
        Some(coordinate) => origin.distance_miles(coordinate) <= radius_miles,
        None => true,
    }
}
