//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_url::ShortUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a short URL record including its redirect count.
///
/// # Endpoint
///
/// `GET /v1/shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let short_url = state.shortener_service.get_by_code(&code).await?;

    Ok(Json(short_url.into()))
}
