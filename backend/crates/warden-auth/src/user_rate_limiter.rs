use crate::RateLimitConfig;

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Per-user request quota (GCRA). A burst of `max_requests` is allowed,
/// replenished evenly over `window_secs`.
///
/// This approximates a fixed window rather than implementing one: one cell
/// comes back every `window_secs / max_requests`, so a client that drains the
/// burst and keeps going can get close to `2 * max_requests` through in any
/// `window_secs` span that straddles the refill.
pub struct UserRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    config: RateLimitConfig,
}

impl UserRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(config.window_secs.max(1)) / burst.get();
        let quota = Quota::with_period(period)
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst));

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// True while `user_id` is within quota. Each call consumes one cell.
    pub fn allow(&self, user_id: &str) -> bool {
        self.limiter.check_key(&user_id.to_string()).is_ok()
    }

    /// Forget users whose quota has fully replenished
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    pub fn tracked_users(&self) -> usize {
        self.limiter.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
