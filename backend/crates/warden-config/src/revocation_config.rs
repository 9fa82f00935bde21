use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_REVOCATION_CAPACITY: usize = 1;
pub const MAX_REVOCATION_CAPACITY: usize = 10_000_000;
pub const DEFAULT_REVOCATION_CAPACITY: usize = 50_000;

pub const MIN_REVOCATION_TTL_SECS: u64 = 60;
pub const MAX_REVOCATION_TTL_SECS: u64 = 7 * 24 * 3600;
pub const DEFAULT_REVOCATION_TTL_SECS: u64 = 24 * 3600;

/// Revoked-token set sizing. The TTL should outlive the credential lifetime;
/// revocations evicted under capacity pressure are lost.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevocationConfig {
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_REVOCATION_CAPACITY,
            ttl_secs: DEFAULT_REVOCATION_TTL_SECS,
        }
    }
}

impl RevocationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.capacity < MIN_REVOCATION_CAPACITY || self.capacity > MAX_REVOCATION_CAPACITY {
            return Err(ConfigError::cache(format!(
                "revocation.capacity must be {}-{}, got {}",
                MIN_REVOCATION_CAPACITY, MAX_REVOCATION_CAPACITY, self.capacity
            )));
        }

        if self.ttl_secs < MIN_REVOCATION_TTL_SECS || self.ttl_secs > MAX_REVOCATION_TTL_SECS {
            return Err(ConfigError::cache(format!(
                "revocation.ttl_secs must be {}-{}, got {}",
                MIN_REVOCATION_TTL_SECS, MAX_REVOCATION_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }
}
