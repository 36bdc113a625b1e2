//! Handlers for the mapping API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::mapping::{CreateMappingRequest, CreateMappingResponse, LookupResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a target address under a custom or generated short code.
///
/// # Endpoint
///
/// `POST /api/id`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_id": "promo"   // optional, blank means generate
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "short_link": "http://localhost:3000/promo"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Missing body, invalid `url`, reserved or malformed `custom_id`
/// - **409 Conflict**: `custom_id` already taken
/// - **503 Service Unavailable**: No free generated code found
pub async fn create_mapping_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMappingRequest>,
) -> Result<(StatusCode, Json<CreateMappingResponse>), AppError> {
    let mapping = state
        .registration
        .register(&payload.url, payload.custom_id.as_deref())
        .await?;

    let response = CreateMappingResponse {
        short_link: state.registration.short_link(&mapping.short),
        url: mapping.original,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns the target address of a short code without redirecting.
///
/// # Endpoint
///
/// `GET /api/id/{short}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is not registered.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(short): Path<String>,
) -> Result<Json<LookupResponse>, AppError> {
    let mapping = state
        .registration
        .resolve(&short)
        .await?
        .ok_or_else(|| not_found(&short))?;

    Ok(Json(LookupResponse {
        url: mapping.original,
    }))
}

pub(crate) fn not_found(short: &str) -> AppError {
    AppError::not_found(
        format!("Short code '{short}' not found"),
        json!({ "short": short }),
    )
}
