//! Radius predicate used by nearby-donation searches.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::point::GeoPoint;

/// A positive, finite search radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Creates a radius from meters.
    pub fn from_meters(meters: f64) -> Result<Self, AppError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(AppError::validation(format!(
                "Search radius must be a positive number, got {meters}"
            )));
        }
        Ok(Self(meters))
    }

    /// Creates a radius from kilometers, the unit used by the HTTP API.
    pub fn from_kilometers(kilometers: f64) -> Result<Self, AppError> {
        Self::from_meters(kilometers * 1_000.0)
    }

    /// The radius in meters.
    pub fn meters(&self) -> f64 {
        self.0
    }
}

/// A center point plus radius. A point is inside the query iff its
/// great-circle distance from the center is at most the radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    /// Search center.
    pub center: GeoPoint,
    /// Inclusive radius.
    pub radius: SearchRadius,
}

impl ProximityQuery {
    /// Creates a new query.
    pub fn new(center: GeoPoint, radius: SearchRadius) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies within the radius (boundary inclusive).
    pub fn matches(&self, point: &GeoPoint) -> bool {
        self.center.distance_to(point) <= self.radius.meters()
    }
}
