//! # catalog-api
//!
//! HTTP API layer for the catalog built on Axum.
//!
//! Provides the REST endpoints, middleware (throttle, logging, CORS),
//! the bearer-token extractor, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
