//! Access log entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A redirect recorded for analytics.
///
/// Client fields are optional: requests may omit the `User-Agent` header and
/// the peer address is not always known.
#[derive(Debug, Clone)]
pub struct AccessLog {
    pub id: i64,
    pub short_url_id: i64,
    pub accessed_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl AccessLog {
    /// Creates a new AccessLog instance.
    pub fn new(
        id: i64,
        short_url_id: i64,
        accessed_at: DateTime<Utc>,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id,
            short_url_id,
            accessed_at,
            user_agent,
            ip_address,
        }
    }
}

/// Input data for recording an access. The timestamp is set by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessLog {
    pub short_url_id: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// A user agent and how many accesses it accounts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentCount {
    pub user_agent: String,
    pub count: i64,
}
