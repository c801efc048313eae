//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::rate_limit::throttle_requests;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
///
/// The throttle is the outermost request-facing layer so rejected clients
/// never reach authentication or the database.
pub fn build_app(state: AppState) -> Router {
    let mut app = build_router()
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors));

    if state.config.rate_limit.enabled {
        app = app.layer(axum_middleware::from_fn_with_state(
            state.clone(),
            throttle_requests,
        ));
    }

    app.with_state(state)
}
