//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodshare_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a resolved bearer token and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role.
    pub role: UserRole,
    /// The user's email.
    pub email: String,
    /// The user's full name.
    pub full_name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: String, full_name: String) -> Self {
        Self {
            user_id,
            role,
            email,
            full_name,
            request_time: Utc::now(),
        }
    }

    /// Creates a context for a stored user.
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.email.clone(), user.full_name.clone())
    }
}
