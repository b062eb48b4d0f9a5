//! Handler for reverse lookups.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::short_url::{FindQuery, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Finds a short URL by composed short URL, short code or original URL.
///
/// # Endpoint
///
/// `GET /v1/shorten/find?url=...`
///
/// When several records share the original URL the newest is returned.
///
/// # Errors
///
/// Returns 404 Not Found if nothing matches.
pub async fn find_handler(
    State(state): State<AppState>,
    Query(query): Query<FindQuery>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let short_url = state.shortener_service.find_by_url(&query.url).await?;

    Ok(Json(short_url.into()))
}
