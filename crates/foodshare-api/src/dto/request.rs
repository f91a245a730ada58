//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use foodshare_core::error::AppError;
use foodshare_entity::donation::{DonationCategory, DonationChanges};
use foodshare_entity::user::UserRole;
use foodshare_service::auth::{LoginInput, RegisterInput};
use foodshare_service::donation::{CreateDonationInput, ListDonationsQuery, UpdateDonationInput};

/// Distinguishes an omitted field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /donations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDonationsParams {
    /// Category label.
    pub category: Option<String>,
    /// Search center latitude.
    pub latitude: Option<f64>,
    /// Search center longitude.
    pub longitude: Option<f64>,
    /// Search radius in kilometers.
    pub radius_km: Option<f64>,
}

impl TryFrom<ListDonationsParams> for ListDonationsQuery {
    type Error = AppError;

    fn try_from(params: ListDonationsParams) -> Result<Self, Self::Error> {
        let category = params
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(str::parse::<DonationCategory>)
            .transpose()?;

        Ok(Self {
            category,
            latitude: params.latitude,
            longitude: params.longitude,
            radius_km: params.radius_km,
        })
    }
}

/// Body of `POST /donations`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDonationRequest {
    /// Short title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Food category.
    pub category: DonationCategory,
    /// Free-text amount.
    #[validate(length(max = 50, message = "Quantity must be at most 50 characters"))]
    pub quantity: Option<String>,
    /// Whether the food is intended for animals.
    #[serde(default)]
    pub is_for_animals: bool,
    /// Pickup latitude.
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    /// Pickup longitude.
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

impl From<CreateDonationRequest> for CreateDonationInput {
    fn from(req: CreateDonationRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category: req.category,
            quantity: req.quantity,
            is_for_animals: req.is_for_animals,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

/// Body of `PATCH /donations/{id}`.
///
/// Parsed only after the caller is known to own the donation; field rules
/// are checked by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDonationRequest {
    /// New title.
    pub title: Option<String>,
    /// New description; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New category.
    pub category: Option<DonationCategory>,
    /// New quantity; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub quantity: Option<Option<String>>,
    /// New animal flag.
    pub is_for_animals: Option<bool>,
    /// Reservation flag.
    pub is_reserved: Option<bool>,
    /// Collection flag.
    pub is_collected: Option<bool>,
}

impl From<UpdateDonationRequest> for UpdateDonationInput {
    fn from(req: UpdateDonationRequest) -> Self {
        Self {
            changes: DonationChanges {
                title: req.title,
                description: req.description,
                category: req.category,
                quantity: req.quantity,
                is_for_animals: req.is_for_animals,
            },
            is_reserved: req.is_reserved,
            is_collected: req.is_collected,
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full name.
    #[validate(length(min = 3, max = 100, message = "Full name must be 3-100 characters"))]
    pub full_name: String,
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Participant kind.
    #[serde(alias = "role")]
    pub user_type: UserRole,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            phone_number: req.phone_number,
            role: req.user_type,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, max = 72, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}
