//! Access event model for asynchronous access logging.

use crate::domain::entities::NewAccessLog;

/// An in-memory access event passed from redirect handlers to the background
/// worker over a bounded channel.
///
/// Redirects return without waiting for the database write.
///
/// # Usage Flow
///
/// 1. Created in a redirect handler once the redirect count was incremented
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::access_worker::run_access_worker`]
/// 4. Converted to [`NewAccessLog`] for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub short_url_id: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl AccessEvent {
    /// Creates a new access event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = AccessEvent::new(42, Some("Mozilla/5.0"), Some("203.0.113.7".to_string()));
    /// ```
    pub fn new(short_url_id: i64, user_agent: Option<&str>, ip_address: Option<String>) -> Self {
        Self {
            short_url_id,
            user_agent: user_agent.map(|s| s.to_string()),
            ip_address,
        }
    }
}

impl From<AccessEvent> for NewAccessLog {
    fn from(event: AccessEvent) -> Self {
        NewAccessLog {
            short_url_id: event.short_url_id,
            user_agent: event.user_agent,
            ip_address: event.ip_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_event_creation_full() {
        let event = AccessEvent::new(7, Some("Mozilla/5.0"), Some("192.168.1.1".to_string()));

        assert_eq!(event.short_url_id, 7);
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.ip_address, Some("192.168.1.1".to_string()));
    }

    #[test]
    fn test_access_event_creation_minimal() {
        let event = AccessEvent::new(1, None, None);

        assert!(event.user_agent.is_none());
        assert!(event.ip_address.is_none());
    }

    #[test]
    fn test_access_event_into_new_access_log() {
        let event = AccessEvent::new(3, Some("curl/8.0"), Some("10.0.0.1".to_string()));
        let new_log: NewAccessLog = event.into();

        assert_eq!(
            new_log,
            NewAccessLog {
                short_url_id: 3,
                user_agent: Some("curl/8.0".to_string()),
                ip_address: Some("10.0.0.1".to_string()),
            }
        );
    }
}
