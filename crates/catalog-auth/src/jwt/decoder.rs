//! Token verification.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::de::{DeserializeOwned, IgnoredAny};

use catalog_core::config::AuthConfig;

use super::claims::{AccessClaims, RefreshClaims, TokenKind};
use crate::error::TokenError;

/// Verifies HS256 tokens against the secret of their kind.
#[derive(Clone)]
pub struct TokenDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
    expiry_only: Validation,
}

impl fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        // Reads `exp` from the payload without touching the signature.
        let mut expiry_only = validation.clone();
        expiry_only.insecure_disable_signature_validation();

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
            expiry_only,
        }
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn verify<T: DeserializeOwned>(&self, token: &str, kind: TokenKind) -> Result<T, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::MalformedClaims);
        }

        // Reject foreign algorithms before any key is involved.
        let header = decode_header(token).map_err(|_| TokenError::InvalidSignature)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::InvalidSignature);
        }

        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        // An elapsed token is `Expired` whatever its signature.
        if let Err(e) = decode::<IgnoredAny>(token, key, &self.expiry_only) {
            if matches!(e.kind(), JwtErrorKind::ExpiredSignature) {
                return Err(TokenError::Expired);
            }
        }

        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))
    }
}

fn classify(kind: &JwtErrorKind) -> TokenError {
    match kind {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        JwtErrorKind::InvalidSignature
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidAlgorithmName
        | JwtErrorKind::InvalidKeyFormat => TokenError::InvalidSignature,
        _ => TokenError::MalformedClaims,
    }
}
