//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered FoodShare user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Login email, stored lowercase.
    pub email: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// What kind of participant the user is.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Full name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

impl User {
    /// Build a new user record from creation input.
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: input.full_name,
            email: input.email.trim().to_lowercase(),
            phone_number: input.phone_number,
            password_hash: input.password_hash,
            role: input.role,
            created_at: now,
            updated_at: now,
        }
    }
}
