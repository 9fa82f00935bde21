//! Session entity - the server-side record of an authenticated login.

use crate::SessionStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login session. Created by the login flow, read and retired by the auth
/// subsystem, never physically deleted by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub status: SessionStatus,
    /// Device/context identifier bound at creation
    pub fingerprint: Option<String>,
    /// Bound at creation or on first authenticated use
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create an active session with no fingerprint or user-agent bound
    pub fn new(id: String, user_id: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            status: SessionStatus::Active,
            fingerprint: None,
            user_agent: None,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// True once `expires_at` is at or before `now`
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// A session can authenticate only while ACTIVE and before `expires_at`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Active && !self.is_past_expiry(now)
    }
}
