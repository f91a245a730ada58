//! Storage traits for donations and users.
//!
//! Every backend must uphold the record invariants checked by
//! [`Donation::check_invariants`]: a write that would break them is
//! rejected and leaves the stored record untouched.

use async_trait::async_trait;
use uuid::Uuid;

use foodshare_core::geo::ProximityQuery;
use foodshare_core::result::AppResult;
use foodshare_entity::donation::{Donation, DonationCategory, DonationChanges, DonationFilter};
use foodshare_entity::user::User;

/// A guarded mutation run by [`DonationStore::update_with`].
///
/// Returning an error aborts the write.
pub type DonationMutation = Box<dyn FnOnce(&mut Donation) -> AppResult<()> + Send>;

/// Canonical storage for donation listings.
#[async_trait]
pub trait DonationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name used in health output.
    fn backend(&self) -> &'static str;

    /// Persist a new donation.
    async fn create(&self, donation: &Donation) -> AppResult<Donation>;

    /// Fetch a donation or fail with `NotFound`.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Donation>;

    /// Fetch several donations, newest first. Unknown ids are skipped.
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Donation>>;

    /// Atomic read-modify-write.
    ///
    /// Loads the donation under an exclusive lock, runs `mutation` on a copy,
    /// refreshes `updated_at`, checks invariants, then writes. Concurrent
    /// calls on the same id are serialized.
    async fn update_with(&self, id: Uuid, mutation: DonationMutation) -> AppResult<Donation>;

    /// Apply a partial field update.
    async fn update(&self, id: Uuid, changes: DonationChanges) -> AppResult<Donation> {
        changes.validate()?;
        self.update_with(
            id,
            Box::new(move |donation: &mut Donation| {
                changes.apply_to(donation);
                Ok(())
            }),
        )
        .await
    }

    /// Remove a donation or fail with `NotFound`.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List donations matching `filter`, newest first.
    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>>;

    /// Ids of donations inside `query`, optionally restricted to a category,
    /// newest first.
    async fn find_nearby(
        &self,
        query: &ProximityQuery,
        category: Option<DonationCategory>,
    ) -> AppResult<Vec<Uuid>>;

    /// Categories currently in use, deduplicated and sorted. Falls back to
    /// every category when the store is empty.
    async fn list_distinct_categories(&self) -> AppResult<Vec<DonationCategory>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<()>;
}

/// Storage for registered users.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new user. A duplicate email fails with `Conflict`.
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Sort newest first, breaking timestamp ties by id for a stable order.
pub(crate) fn sort_newest_first(donations: &mut [Donation]) {
    donations.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Deduplicate and sort categories, falling back to the full enumeration.
pub(crate) fn categories_or_all(
    mut categories: Vec<DonationCategory>,
) -> Vec<DonationCategory> {
    if categories.is_empty() {
        return DonationCategory::ALL.to_vec();
    }
    categories.sort();
    categories.dedup();
    categories
}
