use warden_core::{CoreError, StoreError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid record: {message} {location}")]
    InvalidRecord {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DbError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::InvalidRecord {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidRecord { message, .. } => StoreError::invalid_record(message),
            other => StoreError::unavailable(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
