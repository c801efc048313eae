//! # catalog-database
//!
//! PostgreSQL connection management, migrations, and the concrete
//! repositories backing every catalog resource.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
