//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use catalog_core::error::AppError;
use catalog_core::types::CategoryId;
use catalog_core::types::pagination::PageRequest;
use catalog_entity::product::{ProductFilter, ProductStatus};
use catalog_entity::user::UserRole;

use crate::extractors::PaginationParams;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "full name must be 1-100 characters"))]
    pub full_name: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
    /// Requested role, `user` when absent.
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Parses the requested role name.
    pub fn parsed_role(&self) -> Result<Option<UserRole>, AppError> {
        self.role.as_deref().map(str::parse).transpose()
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "full name must be 1-100 characters"))]
    pub full_name: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "current password is required"))]
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// New password, repeated.
    pub confirm_new_password: String,
}

/// Role change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// Target role name.
    pub role: String,
}

/// Query string for the user listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u64>,
    #[serde(alias = "per_page")]
    pub limit: Option<u64>,
    /// Substring of username, email or full name.
    pub search: Option<String>,
    /// Exact role name.
    pub role: Option<String>,
}

impl UserListQuery {
    /// Page portion of the query.
    pub fn page_request(&self) -> PageRequest {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
        .into_page_request()
    }
}

/// Create product request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "stock quantity cannot be negative"))]
    #[serde(default)]
    pub stock_quantity: i32,
    /// `active` when absent.
    pub status: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

/// Update product request (admin). Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,
    pub status: Option<String>,
    /// Replaces the product's categories when present.
    pub category_ids: Option<Vec<CategoryId>>,
}

/// Query string for the product search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: Option<u64>,
    #[serde(alias = "per_page")]
    pub limit: Option<u64>,
    /// Substring of name or description.
    pub search: Option<String>,
    /// Comma-separated statuses, e.g. `active,draft`.
    pub status: Option<String>,
    pub category_id: Option<CategoryId>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductQuery {
    /// Page portion of the query.
    pub fn page_request(&self) -> PageRequest {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
        .into_page_request()
    }

    /// Filter portion of the query.
    pub fn filter(&self) -> Result<ProductFilter, AppError> {
        let statuses = match self.status.as_deref() {
            Some(list) => parse_statuses(list)?,
            None => Vec::new(),
        };
        Ok(ProductFilter {
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            statuses,
            category_id: self.category_id,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

/// Parses a comma-separated status list, ignoring blank entries.
pub fn parse_statuses(list: &str) -> Result<Vec<ProductStatus>, AppError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Create category request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Update category request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Create review request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(min = 1, max = 500, message = "comment must be 1-500 characters"))]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validate_body;

    #[test]
    fn test_parse_statuses() {
        let statuses = parse_statuses("active, draft,,").unwrap();
        assert_eq!(statuses, vec![ProductStatus::Active, ProductStatus::Draft]);
        assert!(parse_statuses("archived").is_err());
    }

    #[test]
    fn test_register_role_parsing() {
        let mut req = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            role: None,
        };
        assert_eq!(req.parsed_role().unwrap(), None);
        req.role = Some("ADMIN".into());
        assert_eq!(req.parsed_role().unwrap(), Some(UserRole::Admin));
        req.role = Some("superuser".into());
        assert!(req.parsed_role().is_err());
    }

    #[test]
    fn test_review_rating_range() {
        let review = CreateReviewRequest {
            rating: 6,
            comment: "great".into(),
        };
        let err = validate_body(&review).unwrap_err();
        assert_eq!(err.message, "rating must be between 1 and 5");
    }

    #[test]
    fn test_register_email_checked() {
        let req = RegisterRequest {
            username: "bob".into(),
            email: "not-an-email".into(),
            full_name: "Bob".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            role: None,
        };
        assert!(validate_body(&req).is_err());
    }
}
