//! PostgreSQL repository implementations.

pub mod donation;
pub mod user;

pub use donation::DonationRepository;
pub use user::UserRepository;
