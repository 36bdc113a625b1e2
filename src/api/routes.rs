//! API route configuration.

use crate::api::handlers::{create_mapping_handler, lookup_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Mapping API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /id`          - Register a target address
/// - `GET  /id/{short}`  - Look up the target of a short code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/id", post(create_mapping_handler))
        .route("/id/{short}", get(lookup_handler))
}
