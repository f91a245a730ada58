//! Role-based category visibility.

use foodshare_entity::donation::DonationCategory;
use foodshare_entity::user::UserRole;

/// Category a user of `role` is allowed to list.
///
/// Shelter volunteers only see waste food and recipients only see clean
/// food, whatever they asked for. Donors keep the requested category.
pub fn enforce_category(
    role: UserRole,
    requested: Option<DonationCategory>,
) -> Option<DonationCategory> {
    match role {
        UserRole::ShelterVolunteer => Some(DonationCategory::WasteFood),
        UserRole::Recipient => Some(DonationCategory::CleanFood),
        UserRole::Donor => requested,
    }
}
