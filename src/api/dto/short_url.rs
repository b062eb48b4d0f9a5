//! DTOs describing stored short URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ShortUrl, ShortenMethod};

/// A short URL with its redirect statistics.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub method: ShortenMethod,
    pub redirect_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            id: short_url.id,
            original_url: short_url.original_url,
            short_code: short_url.short_code,
            short_url: short_url.short_url,
            method: short_url.method,
            redirect_count: short_url.redirect_count,
            expires_at: short_url.expires_at,
            last_accessed: short_url.last_accessed,
            created_at: short_url.created_at,
            last_modified: short_url.last_modified,
            utm_source: short_url.utm.source,
            utm_medium: short_url.utm.medium,
            utm_campaign: short_url.utm.campaign,
            utm_term: short_url.utm.term,
            utm_content: short_url.utm.content,
        }
    }
}

/// Query for `GET /v1/shorten/find`.
#[derive(Debug, Deserialize)]
pub struct FindQuery {
    /// Composed short URL, short code or original URL.
    pub url: String,
}
