//! Request handlers.

pub mod auth;
pub mod donation;
pub mod health;
