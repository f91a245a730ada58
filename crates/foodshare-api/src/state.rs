//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foodshare_auth::identity::IdentityResolver;
use foodshare_auth::jwt::{JwtDecoder, JwtEncoder};
use foodshare_auth::password::PasswordHasher;
use foodshare_core::config::AppConfig;
use foodshare_core::result::AppResult;
use foodshare_database::Stores;
use foodshare_service::auth::AuthService;
use foodshare_service::donation::DonationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Donation and user stores
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token to user resolution
    pub identity: Arc<IdentityResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Donation matching and reservation
    pub donation_service: Arc<DonationService>,
    /// Registration, login, and profile
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = JwtDecoder::new(&config.auth);

        let identity = Arc::new(IdentityResolver::new(
            jwt_decoder,
            Arc::clone(&stores.users),
        ));
        let donation_service = Arc::new(DonationService::new(
            Arc::clone(&stores.donations),
            &config.matching,
        )?);
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            password_hasher,
            jwt_encoder,
        ));

        Ok(Self {
            config: Arc::new(config),
            stores,
            identity,
            donation_service,
            auth_service,
        })
    }
}
