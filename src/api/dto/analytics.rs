//! DTOs for access analytics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::{AccessLog, UserAgentCount};

/// Query selecting a short code.
#[derive(Debug, Deserialize)]
pub struct CodeQuery {
    pub code: String,
}

/// Query for `GET /v1/shorten/top-agents`.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct TopAgentsQuery {
    pub code: String,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// The most recent access to a short code.
#[derive(Debug, Serialize)]
pub struct LastAccessResponse {
    pub short_code: String,
    pub accessed_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl LastAccessResponse {
    pub fn new(short_code: String, log: AccessLog) -> Self {
        Self {
            short_code,
            accessed_at: log.accessed_at,
            user_agent: log.user_agent,
            ip_address: log.ip_address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserAgentItem {
    pub user_agent: String,
    pub count: i64,
}

impl From<UserAgentCount> for UserAgentItem {
    fn from(item: UserAgentCount) -> Self {
        Self {
            user_agent: item.user_agent,
            count: item.count,
        }
    }
}

/// Top user agents for a short code, most frequent first.
#[derive(Debug, Serialize)]
pub struct TopAgentsResponse {
    pub short_code: String,
    pub items: Vec<UserAgentItem>,
}

/// Distinct client IPs for a short code.
#[derive(Debug, Serialize)]
pub struct UniqueIpsResponse {
    pub short_code: String,
    pub total: usize,
    pub ips: Vec<String>,
}
