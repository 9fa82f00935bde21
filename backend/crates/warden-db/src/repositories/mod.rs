pub mod security_event_repository;
pub mod session_repository;
pub mod user_repository;

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

/// Stored timestamps are epoch seconds
#[track_caller]
pub(crate) fn timestamp_from_epoch(secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::InvalidRecord {
        message: format!("timestamp out of range: {}", secs),
        location: ErrorLocation::from(Location::caller()),
    })
}
