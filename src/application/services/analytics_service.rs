//! Access analytics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{AccessLog, NewAccessLog, UserAgentCount};
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// Number of user agents returned when no limit is given.
pub const DEFAULT_TOP_AGENTS_LIMIT: i64 = 5;
/// Largest accepted user-agent limit.
pub const MAX_TOP_AGENTS_LIMIT: i64 = 50;

/// Service for recording accesses and querying per-code analytics.
pub struct AnalyticsService<R: AccessLogRepository> {
    repository: Arc<R>,
}

impl<R: AccessLogRepository> AnalyticsService<R> {
    /// Creates a new analytics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records a single access.
    ///
    /// Redirect handlers go through the access worker instead of calling this directly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the short URL does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record_access(&self, new_log: NewAccessLog) -> Result<AccessLog, AppError> {
        self.repository.record(new_log).await
    }

    /// Returns the most recent access for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never accessed.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn last_accessed(&self, short_code: &str) -> Result<AccessLog, AppError> {
        self.repository
            .last_accessed(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No access recorded for short code",
                    json!({ "short_code": short_code }),
                )
            })
    }

    /// Returns the distinct client IPs seen for a code.
    pub async fn unique_ips(&self, short_code: &str) -> Result<Vec<String>, AppError> {
        self.repository.unique_ip_addresses(short_code).await
    }

    /// Returns the most frequent user agents for a code.
    ///
    /// `limit` defaults to [`DEFAULT_TOP_AGENTS_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `1..=50`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn top_user_agents(
        &self,
        short_code: &str,
        limit: Option<i64>,
    ) -> Result<Vec<UserAgentCount>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_AGENTS_LIMIT);

        if !(1..=MAX_TOP_AGENTS_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                "Invalid limit",
                json!({ "limit": limit, "min": 1, "max": MAX_TOP_AGENTS_LIMIT }),
            ));
        }

        self.repository.top_user_agents(short_code, limit).await
    }

    /// Counts all recorded accesses.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAccessLogRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_record_access() {
        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo
            .expect_record()
            .withf(|new_log| new_log.short_url_id == 42)
            .times(1)
            .returning(|new_log| {
                Ok(AccessLog::new(
                    1,
                    new_log.short_url_id,
                    Utc::now(),
                    new_log.user_agent,
                    new_log.ip_address,
                ))
            });

        let service = AnalyticsService::new(Arc::new(mock_repo));

        let log = service
            .record_access(NewAccessLog {
                short_url_id: 42,
                user_agent: Some("curl/8.0".to_string()),
                ip_address: Some("203.0.113.7".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(log.short_url_id, 42);
        assert_eq!(log.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[tokio::test]
    async fn test_last_accessed_not_found() {
        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo
            .expect_last_accessed()
            .times(1)
            .returning(|_| Ok(None));

        let service = AnalyticsService::new(Arc::new(mock_repo));

        let result = service.last_accessed("abc12345").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_top_user_agents_default_limit() {
        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo
            .expect_top_user_agents()
            .withf(|code, limit| code == "abc12345" && *limit == DEFAULT_TOP_AGENTS_LIMIT)
            .times(1)
            .returning(|_, _| {
                Ok(vec![UserAgentCount {
                    user_agent: "Mozilla/5.0".to_string(),
                    count: 12,
                }])
            });

        let service = AnalyticsService::new(Arc::new(mock_repo));

        let agents = service.top_user_agents("abc12345", None).await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].count, 12);
    }

    #[tokio::test]
    async fn test_top_user_agents_rejects_out_of_range_limit() {
        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo.expect_top_user_agents().times(0);

        let service = AnalyticsService::new(Arc::new(mock_repo));

        for limit in [0, -1, MAX_TOP_AGENTS_LIMIT + 1] {
            let result = service.top_user_agents("abc12345", Some(limit)).await;
            assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_unique_ips() {
        let mut mock_repo = MockAccessLogRepository::new();
        mock_repo
            .expect_unique_ip_addresses()
            .times(1)
            .returning(|_| Ok(vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()]));

        let service = AnalyticsService::new(Arc::new(mock_repo));

        let ips = service.unique_ips("abc12345").await.unwrap();
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2"]);
    }
}
