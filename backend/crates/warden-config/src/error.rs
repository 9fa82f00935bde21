use std::fmt::Display;
use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// A value was read but fails validation. `section` is the TOML table.
    #[error("Invalid [{section}] setting: {message} {location}")]
    Invalid {
        section: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(section: &'static str, message: S) -> Self {
        ConfigError::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::invalid("auth", message)
    }

    #[track_caller]
    pub fn abuse<S: Into<String>>(message: S) -> Self {
        Self::invalid("abuse", message)
    }

    /// Session cache and revocation set share this section label
    #[track_caller]
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::invalid("cache", message)
    }

    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::invalid("config", message)
    }

    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::invalid("database", message)
    }

    #[track_caller]
    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::invalid("rate_limit", message)
    }

    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::invalid("server", message)
    }

    #[track_caller]
    pub fn sweeper<S: Into<String>>(message: S) -> Self {
        Self::invalid("sweeper", message)
    }

    /// Section name for `Invalid`, `None` for read and parse failures
    pub fn section(&self) -> Option<&'static str> {
        match self {
            ConfigError::Invalid { section, .. } => Some(section),
            ConfigError::Io { .. } | ConfigError::Toml { .. } => None,
        }
    }
}

/// Inclusive bounds check producing `section.field must be min-max, got value`
#[track_caller]
pub(crate) fn ensure_range<T: PartialOrd + Display>(
    section: &'static str,
    field: &str,
    value: T,
    min: T,
    max: T,
) -> ConfigErrorResult<()> {
    if value < min || value > max {
        return Err(ConfigError::invalid(
            section,
            format!("{}.{} must be {}-{}, got {}", section, field, min, max, value),
        ));
    }
    Ok(())
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
