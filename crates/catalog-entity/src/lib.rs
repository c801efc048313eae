//! # catalog-entity
//!
//! Row models for the catalog API. Every struct in this crate represents a
//! database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod category;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;
