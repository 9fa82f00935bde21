use crate::tests::support::test_clock;
use crate::{Clock, TtlLruCache};

use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

#[test]
fn given_entry_when_ttl_elapses_without_access_then_absent() {
    let clock = test_clock();
    let cache = TtlLruCache::new(10, TTL, true, clock.clone() as Arc<dyn Clock>);
    cache.put("k".to_string(), 1);

    clock.advance(TTL);

    assert_eq!(cache.get(&"k".to_string()), None);
    assert_eq!(cache.len(), 0);
}

#[test]
fn given_sliding_entry_when_accessed_before_ttl_then_ttl_refreshed() {
    let clock = test_clock();
    let cache = TtlLruCache::new(10, TTL, true, clock.clone() as Arc<dyn Clock>);
    cache.put("k".to_string(), 1);

    clock.advance(Duration::from_secs(45));
    assert_eq!(cache.get(&"k".to_string()), Some(1));

    // 90s after insert, but only 45s after the last access
    clock.advance(Duration::from_secs(45));
    assert_eq!(cache.get(&"k".to_string()), Some(1));
}

#[test]
fn given_fixed_ttl_entry_when_accessed_then_still_expires_from_insert() {
    let clock = test_clock();
    let cache = TtlLruCache::new(10, TTL, false, clock.clone() as Arc<dyn Clock>);
    cache.put("k".to_string(), 1);

    clock.advance(Duration::from_secs(45));
    assert!(cache.contains(&"k".to_string()));

    clock.advance(Duration::from_secs(15));
    assert!(!cache.contains(&"k".to_string()));
}

#[test]
fn given_full_cache_when_put_then_least_recently_used_evicted() {
    let clock = test_clock();
    let cache = TtlLruCache::new(2, TTL, true, clock as Arc<dyn Clock>);
    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);
    // Touch "a" so "b" becomes least recently used
    cache.get(&"a".to_string());

    let evicted = cache.put("c".to_string(), 3);

    assert_eq!(evicted, Some("b".to_string()));
    assert_eq!(cache.get(&"b".to_string()), None);
    assert_eq!(cache.get(&"a".to_string()), Some(1));
    assert_eq!(cache.get(&"c".to_string()), Some(3));
}

#[test]
fn given_existing_key_when_put_again_then_overwritten_without_eviction() {
    let clock = test_clock();
    let cache = TtlLruCache::new(2, TTL, true, clock as Arc<dyn Clock>);
    cache.put("a".to_string(), 1);

    let evicted = cache.put("a".to_string(), 2);

    assert_eq!(evicted, None);
    assert_eq!(cache.get(&"a".to_string()), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn given_expired_and_live_entries_when_purge_expired_then_only_expired_removed() {
    let clock = test_clock();
    let cache = TtlLruCache::new(10, TTL, true, clock.clone() as Arc<dyn Clock>);
    cache.put("old".to_string(), 1);
    clock.advance(Duration::from_secs(30));
    cache.put("new".to_string(), 2);
    clock.advance(Duration::from_secs(30));

    let purged = cache.purge_expired();

    assert_eq!(purged, 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"new".to_string()), Some(2));
}

#[test]
fn given_update_when_entry_expired_then_closure_sees_none() {
    let clock = test_clock();
    let cache = TtlLruCache::new(10, TTL, false, clock.clone() as Arc<dyn Clock>);
    cache.put("k".to_string(), 5);
    clock.advance(TTL);

    let seen = cache.update("k".to_string(), |current, now| {
        (current.unwrap_or(0) + 1, now + chrono::TimeDelta::seconds(10), current)
    });

    assert_eq!(seen, None);
    assert_eq!(cache.get(&"k".to_string()), Some(1));
}

#[test]
fn given_zero_capacity_when_created_then_holds_one_entry() {
    let clock = test_clock();
    let cache = TtlLruCache::new(0, TTL, true, clock as Arc<dyn Clock>);
    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);

    assert_eq!(cache.capacity(), 1);
    assert_eq!(cache.len(), 1);
}
