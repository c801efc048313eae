//! JWT claim sets for access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Email at the time of issuance.
    pub email: String,
    /// Role at the time of issuance. May be stale by the time it is read.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Claims carried by a refresh token. No email or role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Which secret and claim set a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

impl AccessClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

impl RefreshClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
