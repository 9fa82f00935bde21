use crate::Clock;
use crate::ttl_lru_cache::TtlLruCache;

use std::sync::Arc;
use std::time::Duration;

/// Credentials that must no longer authenticate.
///
/// Credentials carry no unique id, so the full token string is the key.
/// The TTL runs from `add` and is meant to outlive the credential itself;
/// under capacity pressure the oldest revocations are lost.
pub struct RevocationSet {
    tokens: TtlLruCache<String, ()>,
}

impl RevocationSet {
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: TtlLruCache::new(capacity, ttl, false, clock),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token.to_string())
    }

    pub fn add(&self, token: &str) {
        if self.tokens.put(token.to_string(), ()).is_some() {
            log::warn!("Revocation set at capacity, oldest revocation dropped");
        }
    }

    pub fn purge_expired(&self) -> usize {
        self.tokens.purge_expired()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
