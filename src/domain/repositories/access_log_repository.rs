//! Repository trait for access logs and redirect analytics.

use crate::domain::entities::{AccessLog, NewAccessLog, UserAgentCount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for access tracking.
///
/// Lookups are keyed by short code and join through `short_urls`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccessLogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Records a new access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced short URL does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_log: NewAccessLog) -> Result<AccessLog, AppError>;

    /// Returns the most recent access for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn last_accessed(&self, short_code: &str) -> Result<Option<AccessLog>, AppError>;

    /// Returns the distinct client IPs that accessed a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn unique_ip_addresses(&self, short_code: &str) -> Result<Vec<String>, AppError>;

    /// Returns the most frequent user agents for a short code, most frequent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_user_agents(
        &self,
        short_code: &str,
        limit: i64,
    ) -> Result<Vec<UserAgentCount>, AppError>;

    /// Counts all recorded accesses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
