//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use catalog_core::error::{AppError, ErrorKind};

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(count = migrator.iter().count(), "Applying database migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}
