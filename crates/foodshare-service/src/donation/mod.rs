//! Donation matching and reservation.

pub mod proximity;
pub mod reservation;
pub mod service;
pub mod visibility;

pub use proximity::ProximityEngine;
pub use reservation::ReservationState;
pub use service::{
    CreateDonationInput, DonationList, DonationService, ListDonationsQuery, UpdateDonationInput,
};
pub use visibility::enforce_category;
