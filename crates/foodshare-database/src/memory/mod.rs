//! In-process stores backed by `DashMap`.
//!
//! Used for development and tests; contents are lost on restart.

pub mod donation;
pub mod user;

pub use donation::MemoryDonationStore;
pub use user::MemoryUserStore;
