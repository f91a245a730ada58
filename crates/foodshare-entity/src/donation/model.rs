//! Donation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodshare_core::error::AppError;
use foodshare_core::geo::GeoPoint;

use super::category::DonationCategory;
use super::{MAX_QUANTITY_LEN, MAX_TITLE_LEN};

/// A surplus-food listing offered by a donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    /// Unique donation identifier.
    pub id: Uuid,
    /// The user who created the listing.
    pub donor_id: Uuid,
    /// The user currently holding the reservation.
    pub reserved_by: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Food category.
    pub category: DonationCategory,
    /// Free-text amount ("3 trays", "about 5 kg").
    pub quantity: Option<String>,
    /// Whether the food is intended for animals.
    pub is_for_animals: bool,
    /// Whether someone has reserved the listing.
    pub is_reserved: bool,
    /// Whether the listing has been picked up.
    pub is_collected: bool,
    /// Pickup location.
    #[serde(flatten)]
    pub location: GeoPoint,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Build a fresh, available listing from validated creation input.
    pub fn new(input: CreateDonation) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            donor_id: input.donor_id,
            reserved_by: None,
            title: input.title.trim().to_string(),
            description: input.description,
            category: input.category,
            quantity: input.quantity,
            is_for_animals: input.is_for_animals,
            is_reserved: false,
            is_collected: false,
            location: input.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `user_id` created this listing.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.donor_id == user_id
    }

    /// Check whether `user_id` holds the current reservation.
    pub fn is_reserved_by(&self, user_id: Uuid) -> bool {
        self.is_reserved && self.reserved_by == Some(user_id)
    }

    /// Refresh `updated_at`. Never moves the timestamp backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Verify the record-level invariants every persisted donation must hold.
    pub fn check_invariants(&self) -> Result<(), AppError> {
        if self.is_reserved != self.reserved_by.is_some() {
            return Err(AppError::internal(format!(
                "Donation {} has inconsistent reservation state",
                self.id
            )));
        }
        validate_title(&self.title)?;
        if let Some(quantity) = &self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }
}

/// Data required to create a new donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonation {
    /// The creating user.
    pub donor_id: Uuid,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Food category.
    pub category: DonationCategory,
    /// Free-text amount.
    pub quantity: Option<String>,
    /// Whether the food is intended for animals.
    #[serde(default)]
    pub is_for_animals: bool,
    /// Pickup location.
    pub location: GeoPoint,
}

impl CreateDonation {
    /// Validate the free-text fields.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)?;
        if let Some(quantity) = &self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }
}

/// Owner-editable content fields. `None` leaves a field untouched; for the
/// nullable text fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationChanges {
    /// New title.
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear.
    pub description: Option<Option<String>>,
    /// New category.
    pub category: Option<DonationCategory>,
    /// New quantity, or `Some(None)` to clear.
    pub quantity: Option<Option<String>>,
    /// New animal flag.
    pub is_for_animals: Option<bool>,
}

impl DonationChanges {
    /// Validate the fields that are present.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(Some(quantity)) = &self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }

    /// Apply the present fields to `donation`. Does not touch timestamps.
    pub fn apply_to(&self, donation: &mut Donation) {
        if let Some(title) = &self.title {
            donation.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            donation.description = description.clone();
        }
        if let Some(category) = self.category {
            donation.category = category;
        }
        if let Some(quantity) = &self.quantity {
            donation.quantity = quantity.clone();
        }
        if let Some(is_for_animals) = self.is_for_animals {
            donation.is_for_animals = is_for_animals;
        }
    }
}

/// Plain (non-spatial) listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationFilter {
    /// Restrict to one category.
    pub category: Option<DonationCategory>,
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Title must not be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_quantity(quantity: &str) -> Result<(), AppError> {
    if quantity.chars().count() > MAX_QUANTITY_LEN {
        return Err(AppError::validation(format!(
            "Quantity must be at most {MAX_QUANTITY_LEN} characters"
        )));
    }
    Ok(())
}
