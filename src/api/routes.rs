//! Versioned API route configuration.

use crate::api::handlers::{
    find_handler, last_access_handler, redirect_put_handler, shorten_handler, stats_handler,
    top_agents_handler, unique_ips_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/v1`.
///
/// # Endpoints
///
/// - `POST /shorten`             - Create a short URL
/// - `GET  /shorten/find`        - Look up by short URL, code or original URL
/// - `GET  /shorten/last`        - Most recent access for a code
/// - `GET  /shorten/top-agents`  - Most frequent user agents for a code
/// - `GET  /shorten/ips`         - Distinct client IPs for a code
/// - `GET  /shorten/{code}`      - Record and redirect statistics
/// - `PUT  /shorten/{code}`      - Count a redirect and answer 307
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/find", get(find_handler))
        .route("/shorten/last", get(last_access_handler))
        .route("/shorten/top-agents", get(top_agents_handler))
        .route("/shorten/ips", get(unique_ips_handler))
        .route(
            "/shorten/{code}",
            get(stats_handler).put(redirect_put_handler),
        )
}
