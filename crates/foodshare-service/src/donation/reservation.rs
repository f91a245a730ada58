//! Reservation state machine.
//!
//! ```text
//!   Available ──reserve──▶ Reserved ──collect──▶ Collected
//!       ▲                     │
//!       └──────cancel─────────┘
//! ```
//!
//! Every function mutates a donation in place and leaves it untouched on
//! error. They are meant to run inside [`DonationStore::update_with`] so
//! the guard and the write happen under one lock.
//!
//! [`DonationStore::update_with`]: foodshare_database::DonationStore::update_with

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodshare_core::error::AppError;
use foodshare_entity::donation::Donation;

/// Where a donation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReservationState {
    /// Open for reservation.
    Available,
    /// Held by a user.
    Reserved {
        /// The holder.
        by: Uuid,
    },
    /// Picked up. Terminal.
    Collected,
}

impl ReservationState {
    /// Derive the state from a donation's flags.
    pub fn of(donation: &Donation) -> Self {
        if donation.is_collected {
            return Self::Collected;
        }
        match donation.reserved_by {
            Some(by) if donation.is_reserved => Self::Reserved { by },
            _ => Self::Available,
        }
    }
}

/// Reserve `donation` for `user_id`.
///
/// Reserving again as the current holder is a no-op.
pub fn reserve(donation: &mut Donation, user_id: Uuid) -> Result<(), AppError> {
    match ReservationState::of(donation) {
        ReservationState::Collected => Err(AppError::conflict("Donation has already been collected")),
        ReservationState::Reserved { by } if by != user_id => Err(AppError::conflict(
            "Donation is already reserved by a different party",
        )),
        ReservationState::Reserved { .. } => Ok(()),
        ReservationState::Available => {
            donation.is_reserved = true;
            donation.reserved_by = Some(user_id);
            Ok(())
        }
    }
}

/// Release the reservation. Allowed for the holder and the donor.
pub fn cancel_reservation(donation: &mut Donation, user_id: Uuid) -> Result<(), AppError> {
    match ReservationState::of(donation) {
        ReservationState::Collected => Err(AppError::conflict("Donation has already been collected")),
        ReservationState::Available => Err(AppError::conflict("Donation is not currently reserved")),
        ReservationState::Reserved { .. } => {
            if !donation.is_reserved_by(user_id) && !donation.is_owned_by(user_id) {
                return Err(AppError::forbidden(
                    "Only the reserving user or the donor can cancel this reservation",
                ));
            }
            donation.is_reserved = false;
            donation.reserved_by = None;
            Ok(())
        }
    }
}

/// Mark the donation as picked up. Donor only; idempotent.
pub fn collect(donation: &mut Donation, user_id: Uuid) -> Result<(), AppError> {
    if !donation.is_owned_by(user_id) {
        return Err(AppError::forbidden(
            "Only the donor can mark this donation as collected",
        ));
    }
    donation.is_collected = true;
    Ok(())
}

/// Apply reservation flags written through a generic owner update.
///
/// - `is_reserved: false` cancels an existing reservation (no-op otherwise).
/// - `is_reserved: true` is rejected; reserving needs a reserver.
/// - `is_collected: true` collects.
/// - `is_collected: false` on a collected donation is rejected.
pub fn apply_owner_flags(
    donation: &mut Donation,
    owner_id: Uuid,
    is_reserved: Option<bool>,
    is_collected: Option<bool>,
) -> Result<(), AppError> {
    match is_reserved {
        Some(true) => {
            return Err(AppError::validation(
                "is_reserved cannot be set to true directly; use the reserve operation",
            ));
        }
        Some(false) if donation.is_reserved => cancel_reservation(donation, owner_id)?,
        _ => {}
    }

    match is_collected {
        Some(true) => collect(donation, owner_id)?,
        Some(false) if donation.is_collected => {
            return Err(AppError::conflict("Collected donations cannot be reopened"));
        }
        _ => {}
    }
    Ok(())
}
