use crate::clock::{Clock, expiry_after};

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;

struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Bounded map with least-recently-used eviction and a per-entry expiry.
///
/// Expired entries are dropped lazily when touched and in bulk by
/// `purge_expired`. Every operation holds the lock for a single map access;
/// no lock is ever held across an `.await`.
pub struct TtlLruCache<K, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
    /// Reset the expiry on every successful `get`
    sliding: bool,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize, ttl: Duration, sliding: bool, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            sliding,
            clock,
        }
    }

    // Every critical section leaves the map consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Live value for `key`, promoting it to most-recently-used
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();

        match entries.get_mut(key) {
            None => return None,
            Some(entry) if entry.expires_at > now => {
                if self.sliding {
                    entry.expires_at = expiry_after(now, self.ttl);
                }
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }

        entries.pop(key);
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite with the default TTL. Returns the evicted key when
    /// the insert pushed out the least-recently-used entry.
    pub fn put(&self, key: K, value: V) -> Option<K> {
        let expires_at = expiry_after(self.clock.now(), self.ttl);
        self.put_until(key, value, expires_at)
    }

    /// Insert or overwrite with an explicit expiry
    pub fn put_until(&self, key: K, value: V, expires_at: DateTime<Utc>) -> Option<K> {
        let mut entries = self.lock();
        match entries.push(key.clone(), Entry { value, expires_at }) {
            Some((evicted, _)) if evicted != key => Some(evicted),
            _ => None,
        }
    }

    /// Atomic read-modify-write. `apply` sees the live value (None if absent
    /// or expired) and the current time, and returns the new value, its
    /// expiry and a result for the caller.
    pub fn update<R, F>(&self, key: K, apply: F) -> R
    where
        F: FnOnce(Option<V>, DateTime<Utc>) -> (V, DateTime<Utc>, R),
    {
        let now = self.clock.now();
        let mut entries = self.lock();

        let current = entries
            .pop(&key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value);

        let (value, expires_at, result) = apply(current, now);
        entries.push(key, Entry { value, expires_at });
        result
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.lock().pop(key).map(|entry| entry.value)
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();

        let expired: Vec<K> = entries
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    /// Snapshot of the live keys, most recently used first. Does not touch
    /// recency or expiry.
    pub fn keys(&self) -> Vec<K> {
        let now = self.clock.now();
        self.lock()
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
