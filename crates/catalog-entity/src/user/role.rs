//! User role enumeration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Catalog administrator.
    Admin,
    /// Regular user.
    User,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 2] = [Self::Admin, Self::User];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Case-insensitive comparison against a role name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for UserRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for UserRole {
    type Err = catalog_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.matches_name(s))
            .ok_or_else(|| {
                catalog_core::AppError::validation(format!(
                    "Invalid user role: '{s}'. Expected one of: admin, user"
                ))
            })
    }
}

// Tokens and request bodies may carry any casing.
impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("User".parse::<UserRole>().unwrap(), UserRole::User);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_deserialize_ignores_case() {
        let role: UserRole = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert!(serde_json::from_str::<UserRole>("\"root\"").is_err());
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
    }
}
