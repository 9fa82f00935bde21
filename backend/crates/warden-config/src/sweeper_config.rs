use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_SWEEPER_INTERVAL_SECS: u64 = 10;
pub const MAX_SWEEPER_INTERVAL_SECS: u64 = 24 * 3600;
pub const DEFAULT_SWEEPER_INTERVAL_SECS: u64 = 3600;

pub const MIN_SWEEPER_CHUNK_SIZE: u32 = 1;
pub const MAX_SWEEPER_CHUNK_SIZE: u32 = 10_000;
pub const DEFAULT_SWEEPER_CHUNK_SIZE: u32 = 500;

/// Background session sweep schedule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    pub interval_secs: u64,
    /// Sessions fetched per query
    pub chunk_size: u32,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SWEEPER_INTERVAL_SECS,
            chunk_size: DEFAULT_SWEEPER_CHUNK_SIZE,
        }
    }
}

impl SweeperConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_secs < MIN_SWEEPER_INTERVAL_SECS
            || self.interval_secs > MAX_SWEEPER_INTERVAL_SECS
        {
            return Err(ConfigError::sweeper(format!(
                "sweeper.interval_secs must be {}-{}, got {}",
                MIN_SWEEPER_INTERVAL_SECS, MAX_SWEEPER_INTERVAL_SECS, self.interval_secs
            )));
        }

        if self.chunk_size < MIN_SWEEPER_CHUNK_SIZE || self.chunk_size > MAX_SWEEPER_CHUNK_SIZE {
            return Err(ConfigError::sweeper(format!(
                "sweeper.chunk_size must be {}-{}, got {}",
                MIN_SWEEPER_CHUNK_SIZE, MAX_SWEEPER_CHUNK_SIZE, self.chunk_size
            )));
        }

        Ok(())
    }
}
