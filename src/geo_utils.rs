//! Geographic distance helpers.

use crate::TrackPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Distance between two points including the elevation delta when both
/// carry one; falls back to the great-circle distance otherwise.
pub fn distance_3d(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let flat = haversine_distance(p1, p2);
    match (p1.elevation, p2.elevation) {
        (Some(e1), Some(e2)) => {
            let delta = e2 - e1;
            (flat * flat + delta * delta).sqrt()
        }
        _ => flat,
    }
}
