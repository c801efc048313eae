//! Bearer credential extraction and request-scoped identity.

use serde::Serialize;

use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

use crate::error::AuthError;
use crate::jwt::AccessClaims;

/// Authentication scheme accepted in the `Authorization` header.
const BEARER_SCHEME: &str = "Bearer";

/// The authenticated caller of one request.
///
/// Built from verified access claims and dropped with the request. The role
/// is the one embedded in the token and may be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityContext {
    /// The caller's user ID.
    pub subject_id: UserId,
    /// Email at token issuance.
    pub email: String,
    /// Role at token issuance.
    pub role: UserRole,
}

impl IdentityContext {
    /// Maps verified access claims onto an identity context.
    pub fn resolve(claims: AccessClaims) -> Self {
        Self {
            subject_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }

    /// Whether the token-embedded role is admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// The value must be exactly two space-separated parts with the `Bearer`
/// scheme first.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingCredential),
    };

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_accepts_well_formed_header() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_parse_bearer_missing() {
        assert_eq!(parse_bearer(None), Err(AuthError::MissingCredential));
        assert_eq!(parse_bearer(Some("")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_parse_bearer_malformed() {
        for header in [
            "Bearer",
            "Bearer ",
            "Basic abc",
            "bearer abc",
            "Bearer a b",
            "Bearer  abc",
            "abc",
        ] {
            assert_eq!(
                parse_bearer(Some(header)),
                Err(AuthError::MalformedCredential),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_resolve_maps_claims() {
        let claims = AccessClaims {
            sub: UserId::new(5),
            email: "eve@example.com".into(),
            role: UserRole::User,
            iat: 0,
            exp: 1,
        };
        let ctx = IdentityContext::resolve(claims);
        assert_eq!(ctx.subject_id, UserId::new(5));
        assert_eq!(ctx.email, "eve@example.com");
        assert!(!ctx.is_admin());
    }
}
