//! Account registration and credential exchange.

use std::sync::Arc;

use tracing::{debug, info, warn};

use catalog_auth::error::INVALID_TOKEN_MESSAGE;
use catalog_auth::jwt::{TokenPair, TokenService};
use catalog_auth::password::{PasswordHasher, PasswordValidator};
use catalog_core::config::BootstrapAdminConfig;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_database::repositories::UserRepository;
use catalog_entity::user::{CreateUser, User, UserRole};

/// Message returned for any failed login, whichever field was wrong.
const INVALID_LOGIN_MESSAGE: &str = "invalid email or password";

/// Fields accepted at self-registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
    /// Requested role. Only `user` may be self-assigned.
    pub role: Option<UserRole>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: TokenPair,
}

/// What the startup admin step found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The account was created with the admin role.
    Created,
    /// An admin already uses the configured email.
    AlreadyAdmin,
    /// A non-admin account uses the configured email. It is left untouched.
    EmailTakenByUser,
}

impl BootstrapOutcome {
    fn for_existing(role: UserRole) -> Self {
        if role.is_admin() {
            Self::AlreadyAdmin
        } else {
            Self::EmailTakenByUser
        }
    }
}

/// Handles registration, login, and refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: UserRepository,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            validator,
        }
    }

    /// Registers a new regular user.
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        self.validator
            .validate_confirmation(&input.password, &input.confirm_password)?;
        self.validator.validate(&input.password)?;

        let username = input.username.trim();
        let email = input.email.trim();
        let full_name = input.full_name.trim();
        if username.is_empty() || email.is_empty() || full_name.is_empty() {
            return Err(AppError::validation(
                "username, email and full name cannot be empty",
            ));
        }

        if input.role == Some(UserRole::Admin) {
            return Err(AppError::authorization(
                "unauthorized to create admin account",
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("username already exists"));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("email already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                full_name: full_name.to_string(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Creates the configured admin account unless its email is taken.
    ///
    /// An existing account is never promoted, so registering the configured
    /// email first does not grant admin.
    pub async fn ensure_admin(&self, admin: &BootstrapAdminConfig) -> AppResult<BootstrapOutcome> {
        let email = admin.email.trim();
        if let Some(existing) = self.users.find_by_email(email).await? {
            let outcome = BootstrapOutcome::for_existing(existing.role);
            match outcome {
                BootstrapOutcome::EmailTakenByUser => warn!(
                    user_id = %existing.id,
                    "Bootstrap admin email belongs to a non-admin account; not promoting"
                ),
                _ => debug!(user_id = %existing.id, "Bootstrap admin already present"),
            }
            return Ok(outcome);
        }

        self.validator.validate(&admin.password)?;
        let password_hash = self.hasher.hash_password(&admin.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: admin.username.trim().to_string(),
                email: email.to_string(),
                full_name: admin.full_name.trim().to_string(),
                password_hash,
                role: UserRole::Admin,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
        Ok(BootstrapOutcome::Created)
    }

    /// Exchanges email and password for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(mut user) = self.users.find_by_email(email.trim()).await? else {
            debug!("Login for unknown email");
            return Err(AppError::authentication(INVALID_LOGIN_MESSAGE));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::authentication(INVALID_LOGIN_MESSAGE));
        }

        let tokens = self.tokens.issue_pair(user.id, &user.email, user.role)?;
        self.users.update_last_login(user.id).await?;
        user.last_login_at = Some(chrono::Utc::now());

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, tokens })
    }

    /// Exchanges a refresh token for a new pair carrying the user's current
    /// email and role.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_TOKEN_MESSAGE))?;

        let tokens = self.tokens.issue_pair(user.id, &user.email, user.role)?;
        debug!(user_id = %user.id, "Token pair refreshed");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_account_is_never_promoted() {
        assert_eq!(
            BootstrapOutcome::for_existing(UserRole::Admin),
            BootstrapOutcome::AlreadyAdmin
        );
        assert_eq!(
            BootstrapOutcome::for_existing(UserRole::User),
            BootstrapOutcome::EmailTakenByUser
        );
    }
}
