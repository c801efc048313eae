//! In-memory identity store for single-process fixtures and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

use super::{Identity, IdentityStore};

/// Identity store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    identities: Arc<DashMap<UserId, Identity>>,
}

impl MemoryIdentityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an identity.
    pub fn insert(&self, identity: Identity) {
        self.identities.insert(identity.id, identity);
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Identity>> {
        Ok(self.identities.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        Ok(self
            .identities
            .iter()
            .find(|entry| entry.email.eq_ignore_ascii_case(email))
            .map(|entry| entry.value().clone()))
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> AppResult<Identity> {
        let mut entry = self
            .identities
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        entry.role = role;
        Ok(entry.value().clone())
    }

    async fn delete_non_admin(&self, id: UserId) -> AppResult<bool> {
        Ok(self
            .identities
            .remove_if(&id, |_, identity| !identity.role.is_admin())
            .is_some())
    }
}
