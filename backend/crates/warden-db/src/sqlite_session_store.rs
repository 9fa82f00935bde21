use crate::{SecurityEventRepository, SessionRepository};

use warden_core::{SecurityEvent, Session, SessionStore, SessionWithUser, StoreResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqlitePool;

/// `SessionStore` backed by the SQLite pool.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn find_session_by_id(&self, id: &str) -> StoreResult<Option<SessionWithUser>> {
        Ok(SessionRepository::find_with_user(&self.pool, id).await?)
    }

    async fn find_active_sessions_past_expiry(
        &self,
        now: DateTime<Utc>,
        chunk_size: u32,
    ) -> StoreResult<Vec<Session>> {
        Ok(SessionRepository::find_active_past_expiry(&self.pool, now, chunk_size).await?)
    }

    async fn find_active_session_ids(&self, ids: &[String]) -> StoreResult<Vec<String>> {
        Ok(SessionRepository::find_active_ids(&self.pool, ids).await?)
    }

    async fn mark_sessions_expired(&self, ids: &[String]) -> StoreResult<u64> {
        let updated = SessionRepository::mark_expired(&self.pool, ids).await?;
        debug!("Marked {} of {} sessions expired", updated, ids.len());
        Ok(updated)
    }

    async fn append_security_event(&self, event: &SecurityEvent) -> StoreResult<()> {
        Ok(SecurityEventRepository::create(&self.pool, event).await?)
    }

    async fn bind_session_user_agent(&self, id: &str, user_agent: &str) -> StoreResult<()> {
        if SessionRepository::bind_user_agent(&self.pool, id, user_agent).await? {
            debug!("Bound user-agent to session {}", id);
        }
        Ok(())
    }
}
