//! Handlers resolving short codes to their original URL.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::access_event::AccessEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Increment the redirect count and stamp `last_accessed`
/// 2. Offer an access event to the background worker
/// 3. Return 307 Temporary Redirect
///
/// # Access Tracking
///
/// Events go to a bounded channel for async processing. If the queue is
/// full the event is dropped and counted; the redirect is still served.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the short URL has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    resolve_and_track(&state, &code, &headers, addr).await
}

/// Same as [`redirect_handler`], under the versioned API.
///
/// # Endpoint
///
/// `PUT /v1/shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the short URL has expired.
pub async fn redirect_put_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    resolve_and_track(&state, &code, &headers, addr).await
}

async fn resolve_and_track(
    state: &AppState,
    code: &str,
    headers: &HeaderMap,
    addr: SocketAddr,
) -> Result<Redirect, AppError> {
    let short_url = state.shortener_service.resolve(code).await?;

    let event = AccessEvent::new(
        short_url.id,
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        client_ip(headers, Some(addr)),
    );

    if let Err(e) = state.access_sender.try_send(event) {
        metrics::counter!("shortener_access_events_dropped_total").increment(1);
        match e {
            TrySendError::Full(_) => warn!(short_code = code, "Access queue full, event dropped"),
            TrySendError::Closed(_) => {
                warn!(short_code = code, "Access queue closed, event dropped")
            }
        }
    }

    Ok(Redirect::temporary(&short_url.original_url))
}
