use warden_auth::{
    AbuseSettings, AuthGuard, CacheSettings, GuardConfig, RateLimitConfig, SweeperSettings,
};
use warden_config::Config;

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared state for every HTTP handler
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<AuthGuard>,
    pub pool: SqlitePool,
    pub metrics: PrometheusHandle,
    /// Take the client IP from `X-Forwarded-For` instead of the peer address
    pub trust_forwarded_for: bool,
}

/// Translate the validated configuration into the gate's settings
pub fn guard_config(config: &Config) -> GuardConfig {
    GuardConfig {
        session_cache: CacheSettings {
            capacity: config.session_cache.capacity,
            ttl: Duration::from_secs(config.session_cache.ttl_secs),
        },
        revocation: CacheSettings {
            capacity: config.revocation.capacity,
            ttl: Duration::from_secs(config.revocation.ttl_secs),
        },
        abuse: AbuseSettings {
            threshold: config.abuse.threshold,
            lockout: Duration::from_secs(config.abuse.lockout_secs),
            failure_window: Duration::from_secs(config.abuse.failure_window_secs),
            capacity: config.abuse.capacity,
        },
        rate_limit: RateLimitConfig {
            max_requests: config.rate_limit.max_requests,
            window_secs: config.rate_limit.window_secs,
        },
        sweeper: SweeperSettings {
            interval: Duration::from_secs(config.sweeper.interval_secs),
            chunk_size: config.sweeper.chunk_size,
        },
        enforcement_enabled: config.auth.enforcement_enabled,
        leeway_secs: config.auth.leeway_secs,
    }
}
