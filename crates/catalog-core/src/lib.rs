//! # catalog-core
//!
//! Core crate for the catalog API. Contains configuration schemas,
//! typed identifiers, pagination types, the generic record-store trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod http;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
