//! # foodshare-entity
//!
//! Domain entity models for FoodShare. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`; the user entity
//! additionally derives `sqlx::FromRow`.

pub mod donation;
pub mod user;
