//! `AuthUser` extractor: verifies the bearer token and resolves the caller.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use catalog_auth::{AuthError, IdentityContext, parse_bearer};
use catalog_core::error::AppError;

use crate::state::AppState;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub IdentityContext);

impl AuthUser {
    /// Returns the inner `IdentityContext`.
    pub fn context(&self) -> &IdentityContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = IdentityContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Verified once per request.
        if let Some(ctx) = parts.extensions.get::<IdentityContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let ctx = authenticate(parts, state)?;
        parts.extensions.insert(ctx.clone());
        Ok(AuthUser(ctx))
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<IdentityContext, AuthError> {
    let header = match parts.headers.get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedCredential)?),
        None => None,
    };

    let token = parse_bearer(header)?;
    let claims = state.tokens.verify_access(token).map_err(|e| {
        debug!(reason = %e, path = %parts.uri.path(), "Access token rejected");
        e
    })?;

    Ok(IdentityContext::resolve(claims))
}
