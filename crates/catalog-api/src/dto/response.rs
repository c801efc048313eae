//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_auth::{Identity, TokenPair};
use catalog_core::types::UserId;
use catalog_entity::user::{User, UserRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login and refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    /// Present on login, absent on refresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl TokenResponse {
    /// Builds a response from an issued pair.
    pub fn new(tokens: TokenPair, user: Option<UserResponse>) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            user,
        }
    }
}

/// User summary for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Result of a role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChangeResponse {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl From<Identity> for RoleChangeResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            role: identity.role,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}
