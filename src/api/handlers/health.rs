//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All configured components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Counts registered mappings
/// 2. **Storage**: Queries the provider; reported as `disabled` without credentials
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 mappings" },
///     "storage": { "status": "disabled", "message": "DISK_TOKEN not set" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let storage_check = check_storage(&state).await;

    let all_healthy = db_check.is_healthy() && storage_check.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            storage: storage_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.registration.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} mappings")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match &state.storage {
        None => CheckStatus::disabled("DISK_TOKEN not set"),
        Some(storage) if storage.health_check().await => CheckStatus::ok("Provider reachable"),
        Some(_) => CheckStatus::error("Provider unreachable or token rejected"),
    }
}
