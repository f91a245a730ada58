//! # foodshare-database
//!
//! Storage for FoodShare. Defines the [`DonationStore`] and [`UserStore`]
//! traits and provides two implementations of each: PostgreSQL/PostGIS
//! repositories and in-process stores backed by `DashMap`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{DonationMutation, DonationStore, UserStore};
pub use stores::Stores;
