//! Handler for the shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::short_url::ShortUrlResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /v1/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/articles/42",
///   "method": "CUSTOM",          // optional: CUSTOM | RANDOM | HASH | SECURE
///   "custom_alias": "answer",    // required for CUSTOM
///   "expires_at": "2030-01-01T00:00:00Z",
///   "utm_source": "newsletter"
/// }
/// ```
///
/// # Response
///
/// 201 Created with the stored record:
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com/articles/42",
///   "short_code": "answer",
///   "short_url": "https://s.example.com/answer",
///   "method": "CUSTOM",
///   "redirect_count": 0,
///   ...
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL, method or empty custom alias.
/// Returns 409 Conflict if the code is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let input = payload.into_input(state.max_url_length)?;

    let created = state.shortener_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
