//! Catalog Server: product catalog HTTP API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use catalog_api::AppState;
use catalog_auth::{PgIdentityStore, ThrottleSweeper};
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_database::DatabasePool;
use catalog_database::repositories::UserRepository;

/// Environment variable selecting the `config/{env}.toml` overlay.
const ENV_VAR: &str = "CATALOG_ENV";

#[tokio::main]
async fn main() {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting catalog server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    catalog_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Application state ────────────────────────────────
    let identities = Arc::new(PgIdentityStore::new(UserRepository::new(db.pool().clone())));
    let state = AppState::new(config.clone(), db.clone(), identities);

    if let Some(admin) = &config.auth.bootstrap_admin {
        let outcome = state.auth_service.ensure_admin(admin).await?;
        tracing::info!(outcome = ?outcome, email = %admin.email, "Bootstrap admin checked");
    }

    // ── Step 3: Shutdown channel & throttle sweeper ──────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = match config.rate_limit.sweep_interval() {
        Some(interval) if config.rate_limit.enabled => {
            let sweeper = ThrottleSweeper::new(Arc::clone(&state.throttle), interval);
            let cancel = shutdown_rx.clone();
            Some(tokio::spawn(sweeper.run(cancel)))
        }
        _ => None,
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = catalog_api::build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "Catalog server listening");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    db.close().await;

    tracing::info!("Catalog server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
