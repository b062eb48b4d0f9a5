//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, ShortenerService};
use crate::domain::access_event::AccessEvent;
use crate::infrastructure::persistence::{PgAccessLogRepository, PgShortUrlRepository};

/// Application state shared across all handlers.
///
/// Constructed once in [`crate::server::run`]; cloning is cheap since every
/// field is reference-counted or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService<PgShortUrlRepository>>,
    pub analytics_service: Arc<AnalyticsService<PgAccessLogRepository>>,
    /// Producer side of the access-log queue drained by the access worker.
    pub access_sender: mpsc::Sender<AccessEvent>,
    /// Longest original URL accepted when shortening.
    pub max_url_length: usize,
}

impl AppState {
    /// Wires PostgreSQL repositories into the services.
    pub fn new(
        pool: Arc<PgPool>,
        access_sender: mpsc::Sender<AccessEvent>,
        base_url: impl Into<String>,
        max_url_length: usize,
    ) -> Self {
        let short_url_repository = Arc::new(PgShortUrlRepository::new(pool.clone()));
        let access_log_repository = Arc::new(PgAccessLogRepository::new(pool));

        Self {
            shortener_service: Arc::new(ShortenerService::new(short_url_repository, base_url)),
            analytics_service: Arc::new(AnalyticsService::new(access_log_repository)),
            access_sender,
            max_url_length,
        }
    }
}
