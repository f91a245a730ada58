//! Proximity query engine.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use foodshare_core::config::MatchingConfig;
use foodshare_core::geo::{GeoPoint, ProximityQuery, SearchRadius};
use foodshare_core::result::AppResult;
use foodshare_database::DonationStore;
use foodshare_entity::donation::DonationCategory;

/// Turns (center, radius, category) requests into donation ids.
#[derive(Debug, Clone)]
pub struct ProximityEngine {
    store: Arc<dyn DonationStore>,
    default_radius: SearchRadius,
}

impl ProximityEngine {
    /// Creates an engine over `store` using the configured default radius.
    pub fn new(store: Arc<dyn DonationStore>, config: &MatchingConfig) -> AppResult<Self> {
        Ok(Self {
            store,
            default_radius: SearchRadius::from_meters(config.default_radius_meters)?,
        })
    }

    /// Build a query from raw request parameters.
    ///
    /// Returns `Ok(None)` when either coordinate is missing, meaning the
    /// caller should fall back to a plain listing. `radius_km` defaults to
    /// the configured radius.
    pub fn build_query(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: Option<f64>,
    ) -> AppResult<Option<ProximityQuery>> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Ok(None);
        };
        let center = GeoPoint::new(latitude, longitude)?;
        let radius = match radius_km {
            Some(km) => SearchRadius::from_kilometers(km)?,
            None => self.default_radius,
        };
        Ok(Some(ProximityQuery::new(center, radius)))
    }

    /// Ids of donations inside `query`, optionally of one category.
    pub async fn find_nearby(
        &self,
        query: &ProximityQuery,
        category: Option<DonationCategory>,
    ) -> AppResult<Vec<Uuid>> {
        let ids = self.store.find_nearby(query, category).await?;
        debug!(
            latitude = query.center.latitude(),
            longitude = query.center.longitude(),
            radius_meters = query.radius.meters(),
            category = ?category,
            matches = ids.len(),
            "Proximity search completed"
        );
        Ok(ids)
    }
}
