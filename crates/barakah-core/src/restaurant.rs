//! Restaurant domain model.
//!
//! Favoriting is represented once, as a set of restaurant ids owned by the
//! restaurant store; there is no per-restaurant boolean to keep in lockstep.

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A halal restaurant listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub certified: bool,
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Sorts restaurants by distance from `origin`, nearest first.
pub fn nearest(restaurants: &[Restaurant], origin: GeoPoint) -> Vec<&Restaurant> {
    let mut sorted: Vec<&Restaurant> = restaurants.iter().collect();
    sorted.sort_by(|a, b| {
        let da = distance_km(origin, a.location);
        let db = distance_km(origin, b.location);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}
