//! Account service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use foodshare_auth::jwt::{AccessToken, JwtEncoder};
use foodshare_auth::password::{PasswordHasher, PasswordPolicy};
use foodshare_core::error::AppError;
use foodshare_core::result::AppResult;
use foodshare_database::UserStore;
use foodshare_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Fields supplied at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    /// Full name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Participant kind.
    pub role: UserRole,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// A user together with a fresh access token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// The issued token.
    pub token: AccessToken,
}

/// Handles registration, login, and profile lookup.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy: PasswordPolicy,
            encoder,
        }
    }

    /// Create an account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthSession> {
        self.policy.validate(&input.password)?;

        let email = input.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            debug!(email = %email, "Registration rejected: email in use");
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&User::new(CreateUser {
                full_name: input.full_name.trim().to_string(),
                email,
                phone_number: input.phone_number,
                password_hash,
                role: input.role,
            }))
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        self.session_for(user)
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthSession> {
        let invalid = || AppError::unauthenticated("Invalid email or password");

        let Some(user) = self.users.find_by_email(&input.email).await? else {
            debug!("Login rejected: unknown email");
            return Err(invalid());
        };
        if !self.hasher.verify_password(&input.password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(invalid());
        }

        info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    /// The caller's stored profile.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Could not validate credentials"))
    }

    fn session_for(&self, user: User) -> AppResult<AuthSession> {
        let token = self.encoder.generate_access_token(user.id, user.role)?;
        Ok(AuthSession { user, token })
    }
}
