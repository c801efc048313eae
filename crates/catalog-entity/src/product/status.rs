//! Product publication status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible and purchasable.
    #[default]
    Active,
    /// Withdrawn from the catalog.
    Inactive,
    /// Not yet published.
    Draft,
}

impl ProductStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = catalog_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "draft" => Ok(Self::Draft),
            _ => Err(catalog_core::AppError::validation(format!(
                "Invalid product status: '{s}'. Expected one of: active, inactive, draft"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("Draft".parse::<ProductStatus>().unwrap(), ProductStatus::Draft);
        assert!("archived".parse::<ProductStatus>().is_err());
        assert_eq!(ProductStatus::default(), ProductStatus::Active);
    }
}
