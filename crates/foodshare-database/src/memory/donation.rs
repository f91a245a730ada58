//! In-memory donation store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use foodshare_core::error::AppError;
use foodshare_core::geo::ProximityQuery;
use foodshare_core::result::AppResult;
use foodshare_entity::donation::{Donation, DonationCategory, DonationFilter};

use crate::store::{DonationMutation, DonationStore, categories_or_all, sort_newest_first};

/// Donation store holding every record in a concurrent hash map.
///
/// `update_with` runs under the entry's shard write lock, which serializes
/// concurrent mutations of the same donation.
#[derive(Debug, Clone, Default)]
pub struct MemoryDonationStore {
    donations: Arc<DashMap<Uuid, Donation>>,
}

impl MemoryDonationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the store holds no donations.
    pub fn is_empty(&self) -> bool {
        self.donations.is_empty()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::not_found(format!("Donation {id} not found"))
    }
}

#[async_trait]
impl DonationStore for MemoryDonationStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, donation: &Donation) -> AppResult<Donation> {
        donation.check_invariants()?;
        match self.donations.entry(donation.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Donation {} already exists",
                donation.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(donation.clone());
                Ok(donation.clone())
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Donation> {
        self.donations
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Donation>> {
        let mut found: Vec<Donation> = ids
            .iter()
            .filter_map(|id| self.donations.get(id).map(|entry| entry.value().clone()))
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }

    async fn update_with(&self, id: Uuid, mutation: DonationMutation) -> AppResult<Donation> {
        let mut entry = self.donations.get_mut(&id).ok_or_else(|| Self::not_found(id))?;

        let mut updated = entry.value().clone();
        mutation(&mut updated)?;
        // Identity, ownership, location and creation time are immutable.
        updated.id = entry.id;
        updated.donor_id = entry.donor_id;
        updated.location = entry.location;
        updated.created_at = entry.created_at;
        updated.touch();
        updated.check_invariants()?;

        *entry.value_mut() = updated.clone();
        debug!(donation_id = %id, "Donation updated in memory store");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.donations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>> {
        let mut donations: Vec<Donation> = self
            .donations
            .iter()
            .filter(|entry| filter.category.is_none_or(|c| entry.category == c))
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut donations);
        Ok(donations)
    }

    async fn find_nearby(
        &self,
        query: &ProximityQuery,
        category: Option<DonationCategory>,
    ) -> AppResult<Vec<Uuid>> {
        let mut matches: Vec<Donation> = self
            .donations
            .iter()
            .filter(|entry| {
                query.matches(&entry.location) && category.is_none_or(|c| entry.category == c)
            })
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut matches);
        Ok(matches.into_iter().map(|d| d.id).collect())
    }

    async fn list_distinct_categories(&self) -> AppResult<Vec<DonationCategory>> {
        let present = self.donations.iter().map(|entry| entry.category).collect();
        Ok(categories_or_all(present))
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
