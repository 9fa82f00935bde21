use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_ABUSE_THRESHOLD: u32 = 1;
pub const MAX_ABUSE_THRESHOLD: u32 = 1000;
pub const DEFAULT_ABUSE_THRESHOLD: u32 = 5;

pub const MIN_ABUSE_LOCKOUT_SECS: u64 = 1;
pub const MAX_ABUSE_LOCKOUT_SECS: u64 = 24 * 3600;
pub const DEFAULT_ABUSE_LOCKOUT_SECS: u64 = 15 * 60;

pub const DEFAULT_ABUSE_FAILURE_WINDOW_SECS: u64 = 15 * 60;
pub const DEFAULT_ABUSE_CAPACITY: usize = 10_000;

/// Brute-force lockout settings, keyed by client IP
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbuseConfig {
    /// Consecutive failures that trigger a lockout
    pub threshold: u32,
    pub lockout_secs: u64,
    /// Idle time after which an accumulating counter is forgotten
    pub failure_window_secs: u64,
    /// Maximum number of tracked identifiers
    pub capacity: usize,
}

impl Default for AbuseConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ABUSE_THRESHOLD,
            lockout_secs: DEFAULT_ABUSE_LOCKOUT_SECS,
            failure_window_secs: DEFAULT_ABUSE_FAILURE_WINDOW_SECS,
            capacity: DEFAULT_ABUSE_CAPACITY,
        }
    }
}

impl AbuseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.threshold < MIN_ABUSE_THRESHOLD || self.threshold > MAX_ABUSE_THRESHOLD {
            return Err(ConfigError::abuse(format!(
                "abuse.threshold must be {}-{}, got {}",
                MIN_ABUSE_THRESHOLD, MAX_ABUSE_THRESHOLD, self.threshold
            )));
        }

        if self.lockout_secs < MIN_ABUSE_LOCKOUT_SECS || self.lockout_secs > MAX_ABUSE_LOCKOUT_SECS
        {
            return Err(ConfigError::abuse(format!(
                "abuse.lockout_secs must be {}-{}, got {}",
                MIN_ABUSE_LOCKOUT_SECS, MAX_ABUSE_LOCKOUT_SECS, self.lockout_secs
            )));
        }

        if self.failure_window_secs == 0 {
            return Err(ConfigError::abuse("abuse.failure_window_secs must be > 0"));
        }

        if self.capacity == 0 {
            return Err(ConfigError::abuse("abuse.capacity must be > 0"));
        }

        Ok(())
    }
}
