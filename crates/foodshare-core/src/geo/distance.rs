//! Great-circle distance.

use super::point::GeoPoint;

/// Mean earth radius (IUGG), in meters.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle distance between two points in meters, using the haversine
/// formula on a sphere of [`EARTH_MEAN_RADIUS_METERS`].
pub fn haversine_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` marginally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_MEAN_RADIUS_METERS * c
}
