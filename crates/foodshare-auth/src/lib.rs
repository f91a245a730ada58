//! # foodshare-auth
//!
//! Authentication for FoodShare.
//!
//! ## Modules
//!
//! - `jwt`: HS256 access token creation and validation
//! - `password`: Argon2id password hashing and length policy
//! - `identity`: resolving a bearer token to a stored user

pub mod identity;
pub mod jwt;
pub mod password;

pub use identity::IdentityResolver;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};
