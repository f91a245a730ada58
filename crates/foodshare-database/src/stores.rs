//! Backend selection.

use std::sync::Arc;

use tracing::info;

use foodshare_core::config::{AppConfig, StoreBackend};
use foodshare_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryDonationStore, MemoryUserStore};
use crate::migration::run_migrations;
use crate::repositories::{DonationRepository, UserRepository};
use crate::store::{DonationStore, UserStore};

/// The donation and user stores for the configured backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Donation store.
    pub donations: Arc<dyn DonationStore>,
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// The connection pool, when the postgres backend is active.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores selected by `config.store.backend`.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.store.backend {
            StoreBackend::Postgres => {
                info!("Initializing PostgreSQL stores");
                let pool = DatabasePool::connect(&config.database).await?;
                if config.store.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    donations: Arc::new(DonationRepository::new(pool.pool().clone())),
                    users: Arc::new(UserRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            donations: Arc::new(MemoryDonationStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            pool: None,
        }
    }
}
