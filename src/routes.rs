//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short}`     - Short link redirect
//! - `GET  /health`      - Health check: database, storage provider
//! - `POST /files`       - Batch file upload (multipart)
//! - `/api/*`            - Mapping REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - `/files` accepts bodies up to the configured size
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{files_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds all routes with their middleware, without path normalization.
///
/// `max_upload_bytes` bounds the request body accepted by `/files`.
pub fn app_routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/{short}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route(
            "/files",
            post(files_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/api/id/` reaches the
/// same handler as `/api/id`.
pub fn app_router(state: AppState, max_upload_bytes: usize) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state, max_upload_bytes))
}
