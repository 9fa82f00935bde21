use crate::ErrorLocation;

use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

/// Failure reported by a persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or the query failed
    #[error("Store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// A row was read but could not be mapped onto a domain type
    #[error("Invalid stored record: {message} {location}")]
    InvalidRecord {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_record<S: Into<String>>(message: S) -> Self {
        Self::InvalidRecord {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, StoreError>;
