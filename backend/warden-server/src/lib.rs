pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::ApiErrorResponse,
    error::Result as ApiResult,
    extractors::authenticated::Authenticated,
    session::{MeResponse, logout, me},
};
pub use app_state::{AppState, guard_config};
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
