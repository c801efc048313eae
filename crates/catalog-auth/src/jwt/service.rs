//! Token service facade used by the HTTP layer and use cases.

use catalog_core::config::AuthConfig;
use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

use super::claims::{AccessClaims, RefreshClaims, TokenKind};
use super::decoder::TokenDecoder;
use super::encoder::{IssuedToken, TokenEncoder, TokenPair};
use crate::error::TokenError;

/// Issues and verifies access and refresh tokens.
///
/// Secrets are fixed at construction. The service has no side effects and
/// is shared across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: TokenEncoder,
    decoder: TokenDecoder,
}

impl TokenService {
    /// Creates a token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: TokenEncoder::new(config),
            decoder: TokenDecoder::new(config),
        }
    }

    /// Issues an access token carrying the subject's email and role.
    pub fn issue_access(
        &self,
        subject: UserId,
        email: &str,
        role: UserRole,
    ) -> Result<IssuedToken, TokenError> {
        self.encoder.issue_access(subject, email, role)
    }

    /// Issues a refresh token for the subject.
    pub fn issue_refresh(&self, subject: UserId) -> Result<IssuedToken, TokenError> {
        self.encoder.issue_refresh(subject)
    }

    /// Issues an access and refresh token together.
    pub fn issue_pair(
        &self,
        subject: UserId,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, TokenError> {
        let access = self.issue_access(subject, email, role)?;
        let refresh = self.issue_refresh(subject)?;
        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "Bearer".to_string(),
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Verifies an access token.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decoder.verify_access(token)
    }

    /// Verifies a refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decoder.verify_refresh(token)
    }

    /// Verifies a token of either kind, discarding the claims.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, TokenError> {
        match kind {
            TokenKind::Access => self.verify_access(token).map(|c| c.sub),
            TokenKind::Refresh => self.verify_refresh(token).map(|c| c.sub),
        }
    }
}
