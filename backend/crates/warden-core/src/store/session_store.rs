use crate::{SecurityEvent, Session, SessionWithUser, StoreResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The durable store behind the auth subsystem.
///
/// Sessions are created elsewhere (the login flow); this interface only reads
/// them, retires them and appends to the audit trail.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session joined with its owning user's identity and role.
    async fn find_session_by_id(&self, id: &str) -> StoreResult<Option<SessionWithUser>>;

    /// Up to `chunk_size` sessions still ACTIVE whose `expires_at <= now`.
    async fn find_active_sessions_past_expiry(
        &self,
        now: DateTime<Utc>,
        chunk_size: u32,
    ) -> StoreResult<Vec<Session>>;

    /// The subset of `ids` still ACTIVE. Unknown and EXPIRED ids are left out,
    /// whatever their `expires_at`.
    async fn find_active_session_ids(&self, ids: &[String]) -> StoreResult<Vec<String>>;

    /// Flip the given sessions to EXPIRED. Returns the number of rows changed.
    async fn mark_sessions_expired(&self, ids: &[String]) -> StoreResult<u64>;

    async fn append_security_event(&self, event: &SecurityEvent) -> StoreResult<()>;

    /// Bind a user-agent to a session that was created without one.
    /// A session that already has a user-agent is left untouched.
    async fn bind_session_user_agent(&self, id: &str, user_agent: &str) -> StoreResult<()>;
}
