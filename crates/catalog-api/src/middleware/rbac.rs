//! Role guards for handlers.

use catalog_core::error::AppError;
use catalog_entity::user::UserRole;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles allowed to manage the catalog.
const ADMIN_ROLES: [UserRole; 1] = [UserRole::Admin];

/// Checks that the token-embedded role is admin.
///
/// Coarse check only: privilege-sensitive actions re-check the stored role
/// inside their service.
pub fn require_admin(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    state.gate.require(auth, &ADMIN_ROLES)?;
    Ok(())
}
