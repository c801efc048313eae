//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/v1/health
///
/// Always answers 200. A failed database probe reports `degraded`.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, database) = match state.db.health_check().await {
        Ok(()) => ("ok", "connected"),
        Err(e) => {
            warn!(error = %e, "Database health probe failed");
            ("degraded", "unavailable")
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}
