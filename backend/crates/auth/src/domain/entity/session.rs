//! Session Entity
//!
//! Server-side session bound to a user's email. The cookie only carries a
//! signed reference to `session_id`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::email::Email;

/// Session entity
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Serialized user identity
    pub email: Email,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(email: Email, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            email,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = Session::new(Email::from_db("a@x.com"), Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.expires_at_ms > session.created_at.timestamp_millis());
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let session = Session::new(Email::from_db("a@x.com"), Duration::seconds(-1));
        assert!(session.is_expired());
    }
}
