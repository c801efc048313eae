//! Router-level integration tests.
//!
//! These drive the full middleware stack with an in-memory identity store
//! and a lazily connected pool, so no database is required.

mod auth_test;
mod catalog_test;
mod helpers;
mod throttle_test;
