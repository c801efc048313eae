//! User entity model.

use catalog_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A registered catalog user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address, used to log in.
    pub email: String,
    /// Human-readable name.
    pub full_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Authorization role. May change between requests.
    pub role: UserRole,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Profile fields a user may change on their own account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New full name.
    pub full_name: Option<String>,
}

impl UpdateUser {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.full_name.is_none()
    }
}
