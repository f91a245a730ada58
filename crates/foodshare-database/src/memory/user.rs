//! In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use foodshare_core::error::AppError;
use foodshare_core::result::AppResult;
use foodshare_entity::user::User;

/// User store with a unique, lowercase email index.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<Uuid, User>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::store::UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let email = user.email.trim().to_lowercase();
        match self.by_email.entry(email) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already in use")),
            Entry::Vacant(slot) => {
                let mut stored = user.clone();
                stored.email = slot.key().clone();
                self.users.insert(stored.id, stored.clone());
                slot.insert(stored.id);
                Ok(stored)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let key = email.trim().to_lowercase();
        let Some(id) = self.by_email.get(&key).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }
}
