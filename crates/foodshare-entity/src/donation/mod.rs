//! Donation domain entities.

pub mod category;
pub mod model;

pub use category::DonationCategory;
pub use model::{CreateDonation, Donation, DonationChanges, DonationFilter};

/// Maximum title length, counted in characters after trimming.
pub const MAX_TITLE_LEN: usize = 150;

/// Maximum quantity length, counted in characters.
pub const MAX_QUANTITY_LEN: usize = 50;
