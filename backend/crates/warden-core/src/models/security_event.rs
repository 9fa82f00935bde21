use crate::SecurityAction;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only audit record of an authentication outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub id: Uuid,
    /// None when the failure cannot be attributed to a user
    pub user_id: Option<String>,
    pub action: SecurityAction,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SecurityEvent {
    pub fn new(
        action: SecurityAction,
        user_id: Option<String>,
        ip_address: String,
        user_agent: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action,
            ip_address,
            user_agent,
            created_at,
        }
    }
}
