//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::handlers::mapping::not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// Responds with **302 Found** and the stored address in `Location`,
/// exactly as it was registered.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mapping = state
        .registration
        .resolve(&short)
        .await?
        .ok_or_else(|| not_found(&short))?;

    tracing::debug!(%short, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, mapping.original)]))
}
