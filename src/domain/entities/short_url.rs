//! Short URL entity representing a persisted code-to-URL mapping.

use chrono::{DateTime, Utc};

use crate::utils::code_generator::ShortenMethod;

/// Optional campaign tracking parameters stored alongside a short URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

impl UtmParams {
    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.medium.is_none()
            && self.campaign.is_none()
            && self.term.is_none()
            && self.content.is_none()
    }
}

/// A shortened URL with redirect bookkeeping.
#[derive(Debug, Clone)]
pub struct ShortUrl {
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
    pub utm: UtmParams,
}

impl ShortUrl {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for persisting a freshly generated short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub method: ShortenMethod,
    pub expires_at: Option<DateTime<Utc>>,
    pub utm: UtmParams,
}
