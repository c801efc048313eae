//! # catalog-service
//!
//! Use-case layer for the catalog API. Each service orchestrates
//! repositories, the token service, and the authorization gate.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time, and acting callers arrive as an
//! [`catalog_auth::IdentityContext`].

pub mod auth;
pub mod catalog;
pub mod user;

pub use auth::{AuthService, BootstrapOutcome, LoginOutcome, RegisterInput};
pub use catalog::{
    CategoryService, ProductDetails, ProductService, ReviewCounts, ReviewService, WishlistAdd,
    WishlistCounts, WishlistService,
};
pub use user::{AdminUserService, PasswordChange, UserService};
