//! Proximity matching configuration.

use serde::{Deserialize, Serialize};

use crate::geo::DEFAULT_RADIUS_METERS;

/// Settings for nearby-donation searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Radius used when a caller supplies a center point but no radius.
    #[serde(default = "default_radius")]
    pub default_radius_meters: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_radius_meters: default_radius(),
        }
    }
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}
