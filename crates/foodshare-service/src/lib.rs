//! # foodshare-service
//!
//! Business logic for FoodShare. [`DonationService`] is the single entry
//! point for donation operations; it applies the role visibility policy,
//! runs proximity searches, and routes every reservation change through
//! the state machine in [`donation::reservation`].
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod donation;

pub use auth::{AuthService, AuthSession, LoginInput, RegisterInput};
pub use context::RequestContext;
pub use donation::{
    CreateDonationInput, DonationList, DonationService, ListDonationsQuery, ProximityEngine,
    UpdateDonationInput,
};
