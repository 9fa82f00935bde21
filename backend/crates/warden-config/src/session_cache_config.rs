use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_SESSION_CACHE_CAPACITY: usize = 1;
pub const MAX_SESSION_CACHE_CAPACITY: usize = 1_000_000;
pub const DEFAULT_SESSION_CACHE_CAPACITY: usize = 10_000;

pub const MIN_SESSION_CACHE_TTL_SECS: u64 = 1;
pub const MAX_SESSION_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_SESSION_CACHE_TTL_SECS: u64 = 300;

/// Read-through session cache sizing.
/// The TTL is a performance knob; a session's own expiry stays authoritative.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionCacheConfig {
    pub capacity: usize,
    /// Sliding: measured from last access
    pub ttl_secs: u64,
}

impl Default for SessionCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SESSION_CACHE_CAPACITY,
            ttl_secs: DEFAULT_SESSION_CACHE_TTL_SECS,
        }
    }
}

impl SessionCacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.capacity < MIN_SESSION_CACHE_CAPACITY || self.capacity > MAX_SESSION_CACHE_CAPACITY
        {
            return Err(ConfigError::cache(format!(
                "session_cache.capacity must be {}-{}, got {}",
                MIN_SESSION_CACHE_CAPACITY, MAX_SESSION_CACHE_CAPACITY, self.capacity
            )));
        }

        if self.ttl_secs < MIN_SESSION_CACHE_TTL_SECS || self.ttl_secs > MAX_SESSION_CACHE_TTL_SECS
        {
            return Err(ConfigError::cache(format!(
                "session_cache.ttl_secs must be {}-{}, got {}",
                MIN_SESSION_CACHE_TTL_SECS, MAX_SESSION_CACHE_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }
}
