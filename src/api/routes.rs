//! API Routes
//!
//! Configures the Axum router with all media service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_media_handler, delete_media_handler, get_media_handler, health_handler,
    reclaim_handler, resolve_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /resolve` - Resolve a reference (cache first)
/// - `GET /media/:key` - Fetch a cached descriptor
/// - `DELETE /media/:key` - Remove a cached descriptor
/// - `DELETE /media?prefix=` - Remove descriptors by key prefix, or all
/// - `POST /reclaim` - Run a reclamation pass
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// Keys containing `/` (descriptors cached under their URL) must be
/// percent-encoded in the path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/resolve", post(resolve_handler))
        .route("/media", delete(clear_media_handler))
        .route(
            "/media/:key",
            get(get_media_handler).delete(delete_media_handler),
        )
        .route("/reclaim", post(reclaim_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
