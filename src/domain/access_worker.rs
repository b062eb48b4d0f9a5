//! Background worker persisting access events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::application::services::AnalyticsService;
use crate::domain::access_event::AccessEvent;
use crate::domain::entities::NewAccessLog;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// Total attempts per event, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Drains `rx` until every sender is dropped, recording each event through `analytics`.
///
/// At most `concurrency` writes are in flight. Transient database errors are
/// retried with exponential backoff and jitter; events that still fail are
/// logged and counted, never re-queued. Returns once all in-flight writes finish.
pub async fn run_access_worker<R>(
    mut rx: mpsc::Receiver<AccessEvent>,
    analytics: Arc<AnalyticsService<R>>,
    concurrency: usize,
) where
    R: AccessLogRepository + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let analytics = analytics.clone();

        tokio::spawn(async move {
            process_event(analytics.as_ref(), event).await;
            drop(permit);
        });
    }

    // Wait for in-flight writes before returning.
    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!("Access worker stopped");
}

async fn process_event<R>(analytics: &AnalyticsService<R>, event: AccessEvent)
where
    R: AccessLogRepository,
{
    let new_log: NewAccessLog = event.into();
    let short_url_id = new_log.short_url_id;

    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = RetryIf::start(
        strategy,
        || analytics.record_access(new_log.clone()),
        |e: &AppError| matches!(e, AppError::Internal { .. }),
    )
    .await;

    match result {
        Ok(log) => debug!(short_url_id, log_id = log.id, "Access recorded"),
        Err(e) => {
            metrics::counter!("shortener_access_events_failed_total").increment(1);
            warn!(short_url_id, error = %e, "Failed to record access");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccessLog;
    use crate::domain::repositories::MockAccessLogRepository;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn analytics(
        mock_repo: MockAccessLogRepository,
    ) -> Arc<AnalyticsService<MockAccessLogRepository>> {
        Arc::new(AnalyticsService::new(Arc::new(mock_repo)))
    }

    fn recorded(new_log: &NewAccessLog) -> AccessLog {
        AccessLog::new(
            1,
            new_log.short_url_id,
            Utc::now(),
            new_log.user_agent.clone(),
            new_log.ip_address.clone(),
        )
    }

    #[tokio::test]
    async fn test_worker_records_every_event() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo.expect_record().times(3).returning(move |new_log| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(recorded(&new_log))
        });

        let (tx, rx) = mpsc::channel(10);
        for id in 1..=3 {
            tx.send(AccessEvent::new(id, Some("TestBot/1.0"), None))
                .await
                .unwrap();
        }
        drop(tx);

        run_access_worker(rx, analytics(mock_repo), 2).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_worker_retries_internal_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo.expect_record().times(2).returning(move |new_log| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(recorded(&new_log))
            }
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(AccessEvent::new(5, None, Some("10.0.0.1".to_string())))
            .await
            .unwrap();
        drop(tx);

        run_access_worker(rx, analytics(mock_repo), 1).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_does_not_retry_validation_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo.expect_record().times(1).returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::bad_request("Short URL does not exist", json!({})))
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(AccessEvent::new(404, None, None)).await.unwrap();
        drop(tx);

        run_access_worker(rx, analytics(mock_repo), 1).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo
            .expect_record()
            .times(MAX_ATTEMPTS)
            .returning(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::internal("Database error", json!({})))
            });

        let (tx, rx) = mpsc::channel(10);
        tx.send(AccessEvent::new(9, None, None)).await.unwrap();
        drop(tx);

        run_access_worker(rx, analytics(mock_repo), 1).await;

        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }
}
