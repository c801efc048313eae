//! Identity store seam consulted for authoritative role checks.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_entity::user::{User, UserRole};

pub use memory::MemoryIdentityStore;
pub use postgres::PgIdentityStore;

/// The authorization-relevant view of a user, as currently stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Source of truth for identities and their current roles.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Looks up an identity by user ID.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Identity>>;

    /// Looks up an identity by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Replaces a user's role. Fails with `NotFound` for an unknown ID.
    async fn update_role(&self, id: UserId, role: UserRole) -> AppResult<Identity>;

    /// Removes a user unless it currently holds the admin role. The role
    /// check and the removal happen atomically. Returns `true` if a user was
    /// removed.
    async fn delete_non_admin(&self, id: UserId) -> AppResult<bool>;
}
