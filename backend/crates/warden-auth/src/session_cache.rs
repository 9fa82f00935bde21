use crate::Clock;
use crate::ttl_lru_cache::TtlLruCache;

use warden_core::SessionWithUser;

use std::sync::Arc;
use std::time::Duration;

/// Read-through cache of sessions keyed by session id.
///
/// Stale-tolerant: the cache TTL only bounds how long a lookup can be
/// skipped. Callers must still check the session's own expiry after a hit.
pub struct SessionCache {
    entries: TtlLruCache<String, SessionWithUser>,
}

impl SessionCache {
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: TtlLruCache::new(capacity, ttl, true, clock),
        }
    }

    /// Hit refreshes the entry's TTL
    pub fn get(&self, session_id: &str) -> Option<SessionWithUser> {
        self.entries.get(&session_id.to_string())
    }

    pub fn put(&self, session: SessionWithUser) {
        let key = session.session.id.clone();
        if let Some(evicted) = self.entries.put(key, session) {
            log::trace!("Session cache full, evicted {}", evicted);
        }
    }

    pub fn evict(&self, session_id: &str) -> bool {
        self.entries.remove(&session_id.to_string()).is_some()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.entries.keys()
    }

    pub fn purge_expired(&self) -> usize {
        self.entries.purge_expired()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
