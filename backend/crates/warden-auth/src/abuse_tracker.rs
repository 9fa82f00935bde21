use crate::Clock;
use crate::clock::expiry_after;
use crate::guard_config::AbuseSettings;
use crate::ttl_lru_cache::TtlLruCache;

use std::sync::Arc;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AbuseCounter {
    failure_count: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// Consecutive authentication failures per identifier (normally client IP).
///
/// CLEAR -> ACCUMULATING(n) -> LOCKED(until) -> CLEAR. A lapsed lockout is
/// only reset by the next attempt; there is no timer. Idle counters are
/// forgotten after the failure window.
pub struct AbuseTracker {
    counters: TtlLruCache<String, AbuseCounter>,
    settings: AbuseSettings,
}

impl AbuseTracker {
    pub fn new(settings: AbuseSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: TtlLruCache::new(settings.capacity, settings.failure_window, false, clock),
            settings,
        }
    }

    /// Record one failed attempt. Returns false once the identifier is (or
    /// has just become) locked out.
    pub fn record_and_check(&self, identifier: &str) -> bool {
        let threshold = self.settings.threshold.max(1);
        let lockout = self.settings.lockout;
        let window = self.settings.failure_window;

        self.counters
            .update(identifier.to_string(), |current, now| {
                // Still locked: hold the counter as is
                if let Some(counter) = current
                    && let Some(until) = counter.locked_until
                    && until > now
                {
                    return (counter, until, false);
                }

                let previous = current
                    .filter(|counter| counter.locked_until.is_none())
                    .map(|counter| counter.failure_count)
                    .unwrap_or(0);
                let failure_count = previous.saturating_add(1);

                if failure_count >= threshold {
                    let until = expiry_after(now, lockout);
                    let counter = AbuseCounter {
                        failure_count,
                        locked_until: Some(until),
                    };
                    (counter, until, false)
                } else {
                    let counter = AbuseCounter {
                        failure_count,
                        locked_until: None,
                    };
                    (counter, expiry_after(now, window), true)
                }
            })
    }

    /// When the identifier's lockout ends, if it is currently locked
    pub fn locked_until(&self, identifier: &str) -> Option<DateTime<Utc>> {
        self.counters
            .get(&identifier.to_string())
            .and_then(|counter| counter.locked_until)
    }

    /// Failures counted since the last success or lockout
    pub fn failure_count(&self, identifier: &str) -> u32 {
        self.counters
            .get(&identifier.to_string())
            .map(|counter| counter.failure_count)
            .unwrap_or(0)
    }

    /// A successful authentication wipes the identifier's history
    pub fn clear(&self, identifier: &str) {
        self.counters.remove(&identifier.to_string());
    }

    pub fn purge_expired(&self) -> usize {
        self.counters.purge_expired()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
