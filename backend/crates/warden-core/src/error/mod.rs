use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid session status: {value} {location}")]
    InvalidSessionStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid security action: {value} {location}")]
    InvalidSecurityAction {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
