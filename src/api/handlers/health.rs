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
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 short URLs" },
///     "access_queue": { "status": "ok", "message": "Capacity: 10000 of 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let access_queue = check_access_queue(&state);

    let all_healthy = database.is_ok() && access_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            access_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.shortener_service.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} short URLs")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

fn check_access_queue(state: &AppState) -> CheckStatus {
    let sender = &state.access_sender;

    if sender.is_closed() {
        CheckStatus::error("Access queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {} of {}",
            sender.capacity(),
            sender.max_capacity()
        ))
    }
}
