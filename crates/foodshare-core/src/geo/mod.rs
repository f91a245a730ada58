//! Geographic primitives for proximity matching.
//!
//! Everything here is pure computation over coordinates; storage
//! implementations use [`ProximityQuery::matches`] (or an equivalent
//! database predicate) to answer nearby-donation searches.

pub mod distance;
pub mod point;
pub mod query;

pub use distance::{EARTH_MEAN_RADIUS_METERS, haversine_meters};
pub use point::GeoPoint;
pub use query::{ProximityQuery, SearchRadius};

/// Radius used when a caller supplies a center point but no radius.
pub const DEFAULT_RADIUS_METERS: f64 = 5_000.0;
