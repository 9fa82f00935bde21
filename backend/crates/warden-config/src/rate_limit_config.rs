use crate::ConfigErrorResult;
use crate::error::ensure_range;

use serde::Deserialize;

pub const MIN_RATE_LIMIT_REQUESTS: u32 = 1;
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 10_000;
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

pub const MIN_RATE_LIMIT_WINDOW_SECS: u64 = 1;
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Per-user request quota, applied after the credential resolves to a user.
/// Only rejects when `auth.enforcement_enabled` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_range(
            "rate_limit",
            "max_requests",
            self.max_requests,
            MIN_RATE_LIMIT_REQUESTS,
            MAX_RATE_LIMIT_REQUESTS,
        )?;
        ensure_range(
            "rate_limit",
            "window_secs",
            self.window_secs,
            MIN_RATE_LIMIT_WINDOW_SECS,
            MAX_RATE_LIMIT_WINDOW_SECS,
        )
    }
}
