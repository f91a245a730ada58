//! Bearer token to user resolution.

use std::sync::Arc;

use tracing::debug;

use foodshare_core::error::AppError;
use foodshare_core::result::AppResult;
use foodshare_database::UserStore;
use foodshare_entity::user::User;

use crate::jwt::JwtDecoder;

/// Turns an access token into the stored user it was issued for.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    /// Creates a resolver over the given decoder and user store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Validate `token` and load its user.
    ///
    /// Fails with `Unauthenticated` if the token is invalid or expired, or
    /// if the user no longer exists.
    pub async fn resolve(&self, token: &str) -> AppResult<User> {
        let claims = self.decoder.decode_access_token(token)?;

        match self.users.find_by_id(claims.user_id()).await? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %claims.user_id(), "Token subject no longer exists");
                Err(AppError::unauthenticated("Could not validate credentials"))
            }
        }
    }
}
