//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

/// Token signing and credential policy configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    #[serde(default = "default_access_secret")]
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from `access_secret`.
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Admin account created at startup when no account uses its email.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// The first admin account. Self-registration cannot create admins, so a
/// fresh deployment gets one from here.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    pub username: String,
    pub email: String,
    #[serde(default = "default_admin_full_name")]
    pub full_name: String,
    pub password: String,
}

impl BootstrapAdminConfig {
    fn validate(&self, password_min_length: usize) -> Result<(), AppError> {
        if self.username.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AppError::configuration(
                "Bootstrap admin needs a username and an email",
            ));
        }
        if self.password.chars().count() < password_min_length {
            return Err(AppError::configuration(format!(
                "Bootstrap admin password must be at least {password_min_length} characters"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    /// Reject configurations that would weaken token separation.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(AppError::configuration("Token secrets must not be empty"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(AppError::configuration(
                "Access and refresh token secrets must differ",
            ));
        }
        if self.access_ttl_hours == 0 || self.refresh_ttl_hours == 0 {
            return Err(AppError::configuration("Token TTLs must be positive"));
        }
        if self.access_ttl_hours > MAX_TOKEN_TTL_HOURS || self.refresh_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "Token TTLs must not exceed {MAX_TOKEN_TTL_HOURS} hours"
            )));
        }
        if let Some(admin) = &self.bootstrap_admin {
            admin.validate(self.password_min_length)?;
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_hours: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            bootstrap_admin: None,
        }
    }
}

// Secrets never reach the logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .field("password_min_length", &self.password_min_length)
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_ACCESS_SECRET".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_REFRESH_SECRET".to_string()
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    6
}

fn default_admin_full_name() -> String {
    "Administrator".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            access_secret: "super-secret-a".into(),
            refresh_secret: "super-secret-r".into(),
            ..AuthConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let config = AuthConfig {
            refresh_ttl_hours: u64::MAX,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            access_ttl_hours: MAX_TOKEN_TTL_HOURS,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    fn bootstrap(password: &str) -> BootstrapAdminConfig {
        BootstrapAdminConfig {
            username: "admin".into(),
            email: "admin@example.com".into(),
            full_name: default_admin_full_name(),
            password: password.into(),
        }
    }

    #[test]
    fn test_bootstrap_admin_password_policy() {
        let config = AuthConfig {
            bootstrap_admin: Some(bootstrap("abc")),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            bootstrap_admin: Some(bootstrap("long-enough")),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bootstrap_admin_password_redacted() {
        let config = AuthConfig {
            bootstrap_admin: Some(bootstrap("hunter2-hunter2")),
            ..AuthConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("admin@example.com"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig {
            access_secret: String::new(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
