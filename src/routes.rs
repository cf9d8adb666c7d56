use axum::{Router, routing::get};

use crate::AppState;
use crate::handlers;

/// Create browser routes
pub fn browser_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // File serving
        .route("/download/{*path}", get(handlers::download))
        // Directory listings
        .route("/", get(handlers::list_root))
        .route("/{*path}", get(handlers::browse))
}
