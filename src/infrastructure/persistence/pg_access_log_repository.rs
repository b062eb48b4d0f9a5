//! PostgreSQL implementation of the access log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccessLog, NewAccessLog, UserAgentCount};
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// PostgreSQL repository for access logs and analytics queries.
pub struct PgAccessLogRepository {
    pool: Arc<PgPool>,
}

impl PgAccessLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccessLogRow {
    id: i64,
    short_url_id: i64,
    accessed_at: DateTime<Utc>,
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl From<AccessLogRow> for AccessLog {
    fn from(row: AccessLogRow) -> Self {
        AccessLog::new(
            row.id,
            row.short_url_id,
            row.accessed_at,
            row.user_agent,
            row.ip_address,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserAgentRow {
    user_agent: String,
    count: i64,
}

#[async_trait]
impl AccessLogRepository for PgAccessLogRepository {
    async fn record(&self, new_log: NewAccessLog) -> Result<AccessLog, AppError> {
        let row = sqlx::query_as::<_, AccessLogRow>(
            r#"
            INSERT INTO access_logs (short_url_id, user_agent, ip_address)
            VALUES ($1, $2, $3)
            RETURNING id, short_url_id, accessed_at, user_agent, ip_address
            "#,
        )
        .bind(new_log.short_url_id)
        .bind(&new_log.user_agent)
        .bind(&new_log.ip_address)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => AppError::bad_request(
                "Short URL does not exist",
                json!({ "short_url_id": new_log.short_url_id }),
            ),
            _ => AppError::from(e),
        })?;

        Ok(row.into())
    }

    async fn last_accessed(&self, short_code: &str) -> Result<Option<AccessLog>, AppError> {
        let row = sqlx::query_as::<_, AccessLogRow>(
            r#"
            SELECT a.id, a.short_url_id, a.accessed_at, a.user_agent, a.ip_address
            FROM access_logs a
            JOIN short_urls s ON s.id = a.short_url_id
            WHERE s.short_code = $1
            ORDER BY a.accessed_at DESC, a.id DESC
            LIMIT 1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AccessLog::from))
    }

    async fn unique_ip_addresses(&self, short_code: &str) -> Result<Vec<String>, AppError> {
        let ips = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT a.ip_address
            FROM access_logs a
            JOIN short_urls s ON s.id = a.short_url_id
            WHERE s.short_code = $1 AND a.ip_address IS NOT NULL
            ORDER BY a.ip_address
            "#,
        )
        .bind(short_code)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ips)
    }

    async fn top_user_agents(
        &self,
        short_code: &str,
        limit: i64,
    ) -> Result<Vec<UserAgentCount>, AppError> {
        let rows = sqlx::query_as::<_, UserAgentRow>(
            r#"
            SELECT a.user_agent AS user_agent, COUNT(*) AS count
            FROM access_logs a
            JOIN short_urls s ON s.id = a.short_url_id
            WHERE s.short_code = $1 AND a.user_agent IS NOT NULL
            GROUP BY a.user_agent
            ORDER BY count DESC, a.user_agent
            LIMIT $2
            "#,
        )
        .bind(short_code)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| UserAgentCount {
                user_agent: r.user_agent,
                count: r.count,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM access_logs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
