//! Token issuance with per-kind signing secrets and TTLs.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use catalog_core::config::AuthConfig;
use catalog_core::config::auth::MAX_TOKEN_TTL_HOURS;
use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

use super::claims::{AccessClaims, RefreshClaims};
use crate::error::TokenError;

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

/// Access and refresh token issued together on login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Signs access and refresh tokens with HS256.
#[derive(Clone)]
pub struct TokenEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

fn ttl_hours(hours: u64) -> Duration {
    Duration::hours(hours.min(MAX_TOKEN_TTL_HOURS) as i64)
}

impl TokenEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: ttl_hours(config.access_ttl_hours),
            refresh_ttl: ttl_hours(config.refresh_ttl_hours),
        }
    }

    /// Signs an access token for the given subject.
    pub fn issue_access(
        &self,
        subject: UserId,
        email: &str,
        role: UserRole,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.access_ttl;
        let claims = AccessClaims {
            sub: subject,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = sign(&claims, &self.access_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Signs a refresh token for the given subject.
    pub fn issue_refresh(&self, subject: UserId) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.refresh_ttl;
        let claims = RefreshClaims {
            sub: subject,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = sign(&claims, &self.refresh_key)?;
        Ok(IssuedToken { token, expires_at })
    }
}

fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> Result<String, TokenError> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| TokenError::Signing(e.to_string()))
}
