//! Donation matching service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use foodshare_core::config::MatchingConfig;
use foodshare_core::error::AppError;
use foodshare_core::geo::GeoPoint;
use foodshare_core::result::AppResult;
use foodshare_database::DonationStore;
use foodshare_entity::donation::{
    CreateDonation, Donation, DonationCategory, DonationChanges, DonationFilter,
};

use super::proximity::ProximityEngine;
use super::reservation;
use super::visibility::enforce_category;
use crate::context::RequestContext;

/// Parameters of a donation listing request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDonationsQuery {
    /// Requested category; may be overridden by the caller's role.
    pub category: Option<DonationCategory>,
    /// Search center latitude.
    pub latitude: Option<f64>,
    /// Search center longitude.
    pub longitude: Option<f64>,
    /// Search radius in kilometers.
    pub radius_km: Option<f64>,
}

/// Result of a listing request.
#[derive(Debug, Clone, Serialize)]
pub struct DonationList {
    /// Matching donations, newest first.
    pub donations: Vec<Donation>,
    /// Whether a proximity search produced the list.
    pub nearby: bool,
}

impl DonationList {
    /// Human-readable summary of the result.
    pub fn message(&self) -> String {
        if self.nearby && self.donations.is_empty() {
            "No nearby donations found".to_string()
        } else if self.donations.len() == 1 {
            "1 donation found".to_string()
        } else {
            format!("{} donations found", self.donations.len())
        }
    }
}

/// Fields supplied when creating a donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonationInput {
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Food category.
    pub category: DonationCategory,
    /// Free-text amount.
    pub quantity: Option<String>,
    /// Whether the food is intended for animals.
    pub is_for_animals: bool,
    /// Pickup latitude.
    pub latitude: f64,
    /// Pickup longitude.
    pub longitude: f64,
}

/// Fields supplied in an owner update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDonationInput {
    /// Content changes.
    pub changes: DonationChanges,
    /// Requested reservation flag.
    pub is_reserved: Option<bool>,
    /// Requested collection flag.
    pub is_collected: Option<bool>,
}

/// Entry point for every donation operation.
#[derive(Debug, Clone)]
pub struct DonationService {
    store: Arc<dyn DonationStore>,
    proximity: ProximityEngine,
}

impl DonationService {
    /// Creates a new donation service.
    pub fn new(store: Arc<dyn DonationStore>, matching: &MatchingConfig) -> AppResult<Self> {
        let proximity = ProximityEngine::new(Arc::clone(&store), matching)?;
        Ok(Self { store, proximity })
    }

    /// List donations visible to the caller.
    ///
    /// With both coordinates present the proximity engine selects the
    /// candidates; otherwise a plain category listing is returned. An
    /// authenticated caller's role may replace the requested category.
    pub async fn list_donations(
        &self,
        ctx: Option<&RequestContext>,
        query: &ListDonationsQuery,
    ) -> AppResult<DonationList> {
        let category = match ctx {
            Some(ctx) => enforce_category(ctx.role, query.category),
            None => query.category,
        };

        match self
            .proximity
            .build_query(query.latitude, query.longitude, query.radius_km)?
        {
            Some(proximity) => {
                let ids = self.proximity.find_nearby(&proximity, category).await?;
                let donations = self.store.get_many(&ids).await?;
                Ok(DonationList {
                    donations,
                    nearby: true,
                })
            }
            None => {
                let donations = self.store.list(&DonationFilter { category }).await?;
                Ok(DonationList {
                    donations,
                    nearby: false,
                })
            }
        }
    }

    /// Fetch one donation.
    pub async fn get_donation(&self, id: Uuid) -> AppResult<Donation> {
        self.store.get_by_id(id).await
    }

    /// Create a donation owned by the caller.
    pub async fn create_donation(
        &self,
        ctx: &RequestContext,
        input: CreateDonationInput,
    ) -> AppResult<Donation> {
        let create = CreateDonation {
            donor_id: ctx.user_id,
            title: input.title,
            description: input.description,
            category: input.category,
            quantity: input.quantity,
            is_for_animals: input.is_for_animals,
            location: GeoPoint::new(input.latitude, input.longitude)?,
        };
        create.validate()?;

        let donation = self.store.create(&Donation::new(create)).await?;
        info!(
            donation_id = %donation.id,
            user_id = %ctx.user_id,
            category = %donation.category,
            "Donation created"
        );
        Ok(donation)
    }

    /// Owner update of content fields and reservation flags.
    ///
    /// Ownership is checked before the payload is validated.
    pub async fn update_donation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateDonationInput,
    ) -> AppResult<Donation> {
        let user_id = ctx.user_id;
        let updated = self
            .store
            .update_with(
                id,
                Box::new(move |donation: &mut Donation| {
                    if !donation.is_owned_by(user_id) {
                        return Err(AppError::forbidden(
                            "Only the donor can update this donation",
                        ));
                    }
                    input.changes.validate()?;
                    reservation::apply_owner_flags(
                        donation,
                        user_id,
                        input.is_reserved,
                        input.is_collected,
                    )?;
                    input.changes.apply_to(donation);
                    Ok(())
                }),
            )
            .await
            .inspect_err(|e| debug!(donation_id = %id, user_id = %user_id, error = %e, "Update rejected"))?;

        info!(donation_id = %id, user_id = %user_id, "Donation updated");
        Ok(updated)
    }

    /// Reserve a donation for the caller.
    pub async fn reserve_donation(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Donation> {
        let user_id = ctx.user_id;
        let reserved = self
            .store
            .update_with(id, Box::new(move |d: &mut Donation| reservation::reserve(d, user_id)))
            .await
            .inspect_err(|e| {
                debug!(donation_id = %id, user_id = %user_id, error = %e, "Reservation rejected")
            })?;

        info!(donation_id = %id, user_id = %user_id, "Donation reserved");
        Ok(reserved)
    }

    /// Cancel the current reservation. Allowed for the holder and the donor.
    pub async fn cancel_reservation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<Donation> {
        let user_id = ctx.user_id;
        let cancelled = self
            .store
            .update_with(
                id,
                Box::new(move |d: &mut Donation| reservation::cancel_reservation(d, user_id)),
            )
            .await
            .inspect_err(|e| {
                debug!(donation_id = %id, user_id = %user_id, error = %e, "Cancellation rejected")
            })?;

        info!(donation_id = %id, user_id = %user_id, "Reservation cancelled");
        Ok(cancelled)
    }

    /// Fetch a donation and fail with Forbidden unless the caller is its
    /// donor. `action` names the attempted operation in the error message.
    ///
    /// The donor never changes, so the result stays valid after the read.
    pub async fn authorize_owner(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        action: &str,
    ) -> AppResult<Donation> {
        let donation = self.store.get_by_id(id).await?;
        if !donation.is_owned_by(ctx.user_id) {
            debug!(donation_id = %id, user_id = %ctx.user_id, action, "Rejected: not the donor");
            return Err(AppError::forbidden(format!(
                "Only the donor can {action} this donation"
            )));
        }
        Ok(donation)
    }

    /// Delete a donation owned by the caller.
    pub async fn delete_donation(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.authorize_owner(ctx, id, "delete").await?;

        self.store.delete(id).await?;
        info!(donation_id = %id, user_id = %ctx.user_id, "Donation deleted");
        Ok(())
    }

    /// Categories currently in use, or every category for an empty store.
    pub async fn list_categories(&self) -> AppResult<Vec<DonationCategory>> {
        self.store.list_distinct_categories().await
    }

    /// Backend name and reachability, for health reporting.
    pub async fn store_health(&self) -> (&'static str, AppResult<()>) {
        (self.store.backend(), self.store.health_check().await)
    }
}
