use crate::RateLimitConfig;

use std::time::Duration;

/// Size and lifetime of one of the gate's in-memory caches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub capacity: usize,
    pub ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbuseSettings {
    /// Consecutive failures that trigger a lockout
    pub threshold: u32,
    pub lockout: Duration,
    /// Idle time after which an accumulating counter is forgotten
    pub failure_window: Duration,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweeperSettings {
    pub interval: Duration,
    pub chunk_size: u32,
}

/// Everything `AuthGuard` needs besides the signing secret and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub session_cache: CacheSettings,
    pub revocation: CacheSettings,
    pub abuse: AbuseSettings,
    pub rate_limit: RateLimitConfig,
    pub sweeper: SweeperSettings,
    /// When false, lockouts and rate limits are counted and logged but never reject
    pub enforcement_enabled: bool,
    /// Clock skew tolerated by the signature library's own `exp` check
    pub leeway_secs: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            session_cache: CacheSettings {
                capacity: 10_000,
                ttl: Duration::from_secs(300),
            },
            revocation: CacheSettings {
                capacity: 50_000,
                ttl: Duration::from_secs(24 * 3600),
            },
            abuse: AbuseSettings {
                threshold: 5,
                lockout: Duration::from_secs(15 * 60),
                failure_window: Duration::from_secs(15 * 60),
                capacity: 10_000,
            },
            rate_limit: RateLimitConfig::default(),
            sweeper: SweeperSettings {
                interval: Duration::from_secs(3600),
                chunk_size: 500,
            },
            enforcement_enabled: false,
            leeway_secs: 0,
        }
    }
}
