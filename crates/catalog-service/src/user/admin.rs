//! Privileged user management: role changes and account deletion.
//!
//! Every operation here re-checks the caller's role against the identity
//! store before acting, regardless of what the caller's token claims.

use tracing::info;

use catalog_auth::gate::AuthorizationGate;
use catalog_auth::identity::IdentityContext;
use catalog_auth::store::Identity;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_entity::user::UserRole;

const ADMIN_ONLY: [UserRole; 1] = [UserRole::Admin];

/// Handles administrative user operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    gate: AuthorizationGate,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(gate: AuthorizationGate) -> Self {
        Self { gate }
    }

    /// Sets another user's role.
    pub async fn change_role(
        &self,
        ctx: &IdentityContext,
        target: UserId,
        role: UserRole,
    ) -> AppResult<Identity> {
        let actor = self.gate.authorize_fresh(ctx, &ADMIN_ONLY).await?;

        let store = self.gate.store();
        if store.find_by_id(target).await?.is_none() {
            return Err(AppError::not_found("user not found"));
        }

        let updated = store.update_role(target, role).await?;
        info!(
            actor_id = %actor.id,
            target_id = %target,
            new_role = %role,
            "User role changed"
        );
        Ok(updated)
    }

    /// Deletes a non-admin user.
    pub async fn delete_user(&self, ctx: &IdentityContext, target: UserId) -> AppResult<()> {
        let actor = self.gate.authorize_fresh(ctx, &ADMIN_ONLY).await?;

        let store = self.gate.store();
        let Some(existing) = store.find_by_id(target).await? else {
            return Err(AppError::not_found("user not found"));
        };
        if existing.role.is_admin() {
            return Err(AppError::authorization("cannot delete admin user"));
        }

        // The store refuses atomically if the target was promoted meanwhile.
        if !store.delete_non_admin(target).await? {
            return match store.find_by_id(target).await? {
                Some(current) if current.role.is_admin() => {
                    Err(AppError::authorization("cannot delete admin user"))
                }
                _ => Err(AppError::not_found("user not found")),
            };
        }
        info!(actor_id = %actor.id, target_id = %target, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use catalog_auth::store::{IdentityStore, MemoryIdentityStore};
    use catalog_core::error::ErrorKind;

    use super::*;

    fn setup() -> (AdminUserService, MemoryIdentityStore) {
        let store = MemoryIdentityStore::new();
        for (id, role) in [(1, UserRole::Admin), (2, UserRole::User), (3, UserRole::Admin)] {
            store.insert(Identity {
                id: UserId::new(id),
                email: format!("u{id}@example.com"),
                role,
            });
        }
        let gate = AuthorizationGate::new(Arc::new(store.clone()));
        (AdminUserService::new(gate), store)
    }

    fn token_identity(id: u64, role: UserRole) -> IdentityContext {
        IdentityContext {
            subject_id: UserId::new(id),
            email: format!("u{id}@example.com"),
            role,
        }
    }

    #[tokio::test]
    async fn test_admin_promotes_user() {
        let (service, store) = setup();
        let updated = service
            .change_role(&token_identity(1, UserRole::Admin), UserId::new(2), UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);
        let stored = store.find_by_id(UserId::new(2)).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_demoted_admin_token_is_refused() {
        let (service, store) = setup();
        let stale = token_identity(1, UserRole::Admin);
        store.update_role(UserId::new(1), UserRole::User).await.unwrap();

        let err = service
            .change_role(&stale, UserId::new(2), UserRole::Admin)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));

        let target = store.find_by_id(UserId::new(2)).await.unwrap().unwrap();
        assert_eq!(target.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_unknown_target_is_not_found() {
        let (service, _) = setup();
        let err = service
            .change_role(&token_identity(1, UserRole::Admin), UserId::new(42), UserRole::User)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_admin_accounts_cannot_be_deleted() {
        let (service, store) = setup();
        let admin = token_identity(1, UserRole::Admin);

        let err = service.delete_user(&admin, UserId::new(3)).await.unwrap_err();
        assert!(err.is(ErrorKind::Authorization));
        assert_eq!(err.message, "cannot delete admin user");

        service.delete_user(&admin, UserId::new(2)).await.unwrap();
        assert!(store.find_by_id(UserId::new(2)).await.unwrap().is_none());
    }

    /// Store whose first lookup reports a plain user while the stored row
    /// already carries the admin role, as after a concurrent promotion.
    struct PromotedMeanwhile {
        inner: MemoryIdentityStore,
        stale_reads: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl IdentityStore for PromotedMeanwhile {
        async fn find_by_id(&self, id: UserId) -> AppResult<Option<Identity>> {
            let found = self.inner.find_by_id(id).await?;
            let n = self.stale_reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            // Read 0 is the gate's actor check, read 1 the target lookup.
            if id == UserId::new(2) && n == 1 {
                return Ok(found.map(|i| Identity { role: UserRole::User, ..i }));
            }
            Ok(found)
        }
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
            self.inner.find_by_email(email).await
        }
        async fn update_role(&self, id: UserId, role: UserRole) -> AppResult<Identity> {
            self.inner.update_role(id, role).await
        }
        async fn delete_non_admin(&self, id: UserId) -> AppResult<bool> {
            self.inner.delete_non_admin(id).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_promotion_blocks_delete() {
        let inner = MemoryIdentityStore::new();
        for (id, role) in [(1, UserRole::Admin), (2, UserRole::Admin)] {
            inner.insert(Identity {
                id: UserId::new(id),
                email: format!("u{id}@example.com"),
                role,
            });
        }
        let store = PromotedMeanwhile {
            inner: inner.clone(),
            stale_reads: Default::default(),
        };
        let service = AdminUserService::new(AuthorizationGate::new(Arc::new(store)));

        let err = service
            .delete_user(&token_identity(1, UserRole::Admin), UserId::new(2))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));
        assert!(inner.find_by_id(UserId::new(2)).await.unwrap().is_some());
    }
}
