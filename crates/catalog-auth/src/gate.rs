//! Role-based authorization decisions.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AuthError;
use crate::identity::IdentityContext;
use crate::store::{Identity, IdentityStore};

/// Decides whether an identity may perform a role-restricted action.
///
/// [`AuthorizationGate::authorize`] trusts the role embedded in the token.
/// [`AuthorizationGate::authorize_fresh`] re-reads the role from the
/// identity store and is required for privilege-sensitive actions, since a
/// token keeps its role until it expires.
#[derive(Clone)]
pub struct AuthorizationGate {
    store: Arc<dyn IdentityStore>,
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate").finish_non_exhaustive()
    }
}

impl AuthorizationGate {
    /// Creates a gate over the given identity store.
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Coarse check against the token-embedded role.
    ///
    /// Role names compare case-insensitively. An empty allow-list denies.
    pub fn authorize<R: AsRef<str>>(&self, identity: &IdentityContext, required: &[R]) -> bool {
        required
            .iter()
            .any(|role| identity.role.matches_name(role.as_ref()))
    }

    /// [`AuthorizationGate::authorize`] as a `Result`.
    pub fn require<R: AsRef<str>>(
        &self,
        identity: &IdentityContext,
        required: &[R],
    ) -> Result<(), AuthError> {
        if self.authorize(identity, required) {
            Ok(())
        } else {
            debug!(
                user_id = %identity.subject_id,
                role = %identity.role,
                "Token role not in allow-list"
            );
            Err(AuthError::InsufficientRole)
        }
    }

    /// Authoritative check against the identity's current stored role.
    ///
    /// Returns the fresh identity on success. A lookup failure is an
    /// upstream error. A vanished identity is denied.
    pub async fn authorize_fresh<R: AsRef<str>>(
        &self,
        identity: &IdentityContext,
        required: &[R],
    ) -> Result<Identity, AuthError> {
        let current = self
            .store
            .find_by_id(identity.subject_id)
            .await
            .map_err(|e| {
                warn!(user_id = %identity.subject_id, error = %e, "Identity lookup failed");
                AuthError::UpstreamLookupFailure(e.message)
            })?;

        let Some(current) = current else {
            debug!(user_id = %identity.subject_id, "Identity no longer exists");
            return Err(AuthError::InsufficientRole);
        };

        if required
            .iter()
            .any(|role| current.role.matches_name(role.as_ref()))
        {
            Ok(current)
        } else {
            debug!(
                user_id = %identity.subject_id,
                token_role = %identity.role,
                current_role = %current.role,
                "Stored role not in allow-list"
            );
            Err(AuthError::InsufficientRole)
        }
    }

    /// The identity store this gate consults.
    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use catalog_core::error::AppError;
    use catalog_core::result::AppResult;
    use catalog_core::types::UserId;
    use catalog_entity::user::UserRole;

    use super::*;
    use crate::store::MemoryIdentityStore;

    fn ctx(id: u64, role: UserRole) -> IdentityContext {
        IdentityContext {
            subject_id: UserId::new(id),
            email: format!("u{id}@example.com"),
            role,
        }
    }

    fn seeded(entries: &[(u64, UserRole)]) -> (AuthorizationGate, MemoryIdentityStore) {
        let store = MemoryIdentityStore::new();
        for (id, role) in entries {
            store.insert(Identity {
                id: UserId::new(*id),
                email: format!("u{id}@example.com"),
                role: *role,
            });
        }
        (AuthorizationGate::new(Arc::new(store.clone())), store)
    }

    struct FailingStore;

    #[async_trait]
    impl IdentityStore for FailingStore {
        async fn find_by_id(&self, _id: UserId) -> AppResult<Option<Identity>> {
            Err(AppError::database("connection refused"))
        }
        async fn find_by_email(&self, _email: &str) -> AppResult<Option<Identity>> {
            Err(AppError::database("connection refused"))
        }
        async fn update_role(&self, _id: UserId, _role: UserRole) -> AppResult<Identity> {
            Err(AppError::database("connection refused"))
        }
        async fn delete_non_admin(&self, _id: UserId) -> AppResult<bool> {
            Err(AppError::database("connection refused"))
        }
    }

    #[test]
    fn test_authorize_matches_case_insensitively() {
        let (gate, _) = seeded(&[]);
        let admin = ctx(1, UserRole::Admin);
        assert!(gate.authorize(&admin, &["ADMIN"]));
        assert!(gate.authorize(&admin, &[UserRole::Admin]));
        assert!(!gate.authorize(&ctx(2, UserRole::User), &["admin"]));
    }

    #[test]
    fn test_empty_allow_list_denies() {
        let (gate, _) = seeded(&[]);
        let none: [&str; 0] = [];
        assert!(!gate.authorize(&ctx(1, UserRole::Admin), &none));
        assert_eq!(
            gate.require(&ctx(1, UserRole::Admin), &none),
            Err(AuthError::InsufficientRole)
        );
    }

    #[tokio::test]
    async fn test_fresh_check_uses_stored_role() {
        let (gate, store) = seeded(&[(1, UserRole::Admin)]);
        let token_identity = ctx(1, UserRole::Admin);

        assert!(gate.authorize_fresh(&token_identity, &[UserRole::Admin]).await.is_ok());

        store.update_role(UserId::new(1), UserRole::User).await.unwrap();

        // The token still claims admin, so the coarse check keeps passing.
        assert!(gate.authorize(&token_identity, &[UserRole::Admin]));
        assert_eq!(
            gate.authorize_fresh(&token_identity, &[UserRole::Admin]).await,
            Err(AuthError::InsufficientRole)
        );
    }

    #[tokio::test]
    async fn test_fresh_check_grants_promoted_user() {
        let (gate, _) = seeded(&[(2, UserRole::Admin)]);
        let stale = ctx(2, UserRole::User);
        let fresh = gate.authorize_fresh(&stale, &["admin"]).await.unwrap();
        assert_eq!(fresh.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_fresh_check_denies_deleted_identity() {
        let (gate, _) = seeded(&[]);
        assert_eq!(
            gate.authorize_fresh(&ctx(3, UserRole::Admin), &[UserRole::Admin]).await,
            Err(AuthError::InsufficientRole)
        );
    }

    #[tokio::test]
    async fn test_fresh_check_surfaces_store_failure() {
        let gate = AuthorizationGate::new(Arc::new(FailingStore));
        let result = gate
            .authorize_fresh(&ctx(1, UserRole::Admin), &[UserRole::Admin])
            .await;
        assert!(matches!(result, Err(AuthError::UpstreamLookupFailure(_))));
    }
}
