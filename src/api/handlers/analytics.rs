//! Handlers for per-code access analytics.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::analytics::{
    CodeQuery, LastAccessResponse, TopAgentsQuery, TopAgentsResponse, UniqueIpsResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the most recent access to a short code.
///
/// # Endpoint
///
/// `GET /v1/shorten/last?code=...`
///
/// # Errors
///
/// Returns 404 Not Found if the code was never accessed.
pub async fn last_access_handler(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Result<Json<LastAccessResponse>, AppError> {
    let log = state.analytics_service.last_accessed(&query.code).await?;

    Ok(Json(LastAccessResponse::new(query.code, log)))
}

/// Returns the most frequent user agents for a short code.
///
/// # Endpoint
///
/// `GET /v1/shorten/top-agents?code=...&limit=5`
///
/// # Query Parameters
///
/// - `code` (required): Short code
/// - `limit` (optional): Number of agents (default: 5, max: 50)
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is out of range.
pub async fn top_agents_handler(
    State(state): State<AppState>,
    Query(query): Query<TopAgentsQuery>,
) -> Result<Json<TopAgentsResponse>, AppError> {
    let agents = state
        .analytics_service
        .top_user_agents(&query.code, query.limit)
        .await?;

    Ok(Json(TopAgentsResponse {
        short_code: query.code,
        items: agents.into_iter().map(Into::into).collect(),
    }))
}

/// Returns the distinct client IPs that accessed a short code.
///
/// # Endpoint
///
/// `GET /v1/shorten/ips?code=...`
pub async fn unique_ips_handler(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Result<Json<UniqueIpsResponse>, AppError> {
    let ips = state.analytics_service.unique_ips(&query.code).await?;

    Ok(Json(UniqueIpsResponse {
        short_code: query.code,
        total: ips.len(),
        ips,
    }))
}
