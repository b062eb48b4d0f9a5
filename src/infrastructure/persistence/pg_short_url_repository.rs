//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortenMethod, UtmParams};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL storage and redirect bookkeeping.
///
/// Queries are bound at runtime and decoded through [`ShortUrlRow`].
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Raw `short_urls` row; `method` is stored as text.
#[derive(Debug, sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    short_url: String,
    method: String,
    redirect_count: i64,
    expires_at: Option<DateTime<Utc>>,
    last_accessed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    utm_source: Option<String>,
    utm_medium: Option<String>,
    utm_campaign: Option<String>,
    utm_term: Option<String>,
    utm_content: Option<String>,
}

impl TryFrom<ShortUrlRow> for ShortUrl {
    type Error = AppError;

    fn try_from(row: ShortUrlRow) -> Result<Self, Self::Error> {
        let method: ShortenMethod = row.method.parse().map_err(|_| {
            tracing::error!(id = row.id, method = %row.method, "unknown method in short_urls");
            AppError::internal("Invalid stored method", json!({ "method": row.method }))
        })?;

        Ok(ShortUrl {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            short_url: row.short_url,
            method,
            redirect_count: row.redirect_count,
            expires_at: row.expires_at,
            last_accessed: row.last_accessed,
            created_at: row.created_at,
            last_modified: row.last_modified,
            utm: UtmParams {
                source: row.utm_source,
                medium: row.utm_medium,
                campaign: row.utm_campaign,
                term: row.utm_term,
                content: row.utm_content,
            },
        })
    }
}

fn into_entity(row: Option<ShortUrlRow>) -> Result<Option<ShortUrl>, AppError> {
    row.map(ShortUrl::try_from).transpose()
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (
                original_url, short_code, short_url, method, expires_at,
                utm_source, utm_medium, utm_campaign, utm_term, utm_content
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, original_url, short_code, short_url, method, redirect_count,
                      expires_at, last_accessed, created_at, last_modified,
                      utm_source, utm_medium, utm_campaign, utm_term, utm_content
            "#,
        )
        .bind(&new_short_url.original_url)
        .bind(&new_short_url.short_code)
        .bind(&new_short_url.short_url)
        .bind(new_short_url.method.as_str())
        .bind(new_short_url.expires_at)
        .bind(&new_short_url.utm.source)
        .bind(&new_short_url.utm.medium)
        .bind(&new_short_url.utm.campaign)
        .bind(&new_short_url.utm.term)
        .bind(&new_short_url.utm.content)
        .fetch_one(self.pool.as_ref())
        .await?;

        ShortUrl::try_from(row)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, original_url, short_code, short_url, method, redirect_count,
                   expires_at, last_accessed, created_at, last_modified,
                   utm_source, utm_medium, utm_campaign, utm_term, utm_content
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        into_entity(row)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, original_url, short_code, short_url, method, redirect_count,
                   expires_at, last_accessed, created_at, last_modified,
                   utm_source, utm_medium, utm_campaign, utm_term, utm_content
            FROM short_urls
            WHERE short_url = $1 OR short_code = $1 OR original_url = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        into_entity(row)
    }

    async fn increment_redirect_count(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            UPDATE short_urls
            SET redirect_count = redirect_count + 1,
                last_accessed = NOW()
            WHERE short_code = $1
              AND (expires_at IS NULL OR expires_at > NOW())
            RETURNING id, original_url, short_code, short_url, method, redirect_count,
                      expires_at, last_accessed, created_at, last_modified,
                      utm_source, utm_medium, utm_campaign, utm_term, utm_content
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        into_entity(row)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
