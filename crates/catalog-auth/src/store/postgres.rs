//! PostgreSQL-backed identity store.

use async_trait::async_trait;

use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_database::repositories::UserRepository;
use catalog_entity::user::UserRole;

use super::{Identity, IdentityStore};

/// Identity store reading the `users` table.
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    users: UserRepository,
}

impl PgIdentityStore {
    /// Wraps a user repository.
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Identity>> {
        Ok(self.users.find_by_id(id).await?.as_ref().map(Identity::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        Ok(self
            .users
            .find_by_email(email)
            .await?
            .as_ref()
            .map(Identity::from))
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> AppResult<Identity> {
        let user = self.users.update_role(id, role).await?;
        Ok(Identity::from(&user))
    }

    async fn delete_non_admin(&self, id: UserId) -> AppResult<bool> {
        self.users.delete_non_admin(id).await
    }
}
