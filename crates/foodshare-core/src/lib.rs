//! # foodshare-core
//!
//! Core crate for FoodShare. Contains configuration schemas, the geographic
//! primitives used by proximity matching, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FoodShare crates.

pub mod config;
pub mod error;
pub mod geo;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
