use crate::DEFAULT_LOG_LEVEL;

use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Log level read from config or `WARDEN_LOG_LEVEL`.
///
/// Unknown or non-string values fall back to `info` rather than failing
/// startup; logging must come up before anything else can be reported.
#[derive(Debug, Clone, Copy)]
pub struct LogLevel(pub LevelFilter);

impl LogLevel {
    fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        let level = if s.eq_ignore_ascii_case("warning") {
            LevelFilter::Warn
        } else {
            LevelFilter::from_str(s).unwrap_or(DEFAULT_LOG_LEVEL)
        };
        LogLevel(level)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(DEFAULT_LOG_LEVEL)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)
            .map(|s| Self::parse_lenient(&s))
            .unwrap_or_default())
    }
}

impl FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
