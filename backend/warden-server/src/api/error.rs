//! REST API error types
//!
//! Authentication failures are answered with `{"error": ..., "detail": ...}`
//! where `detail` is the stable rejection name and nothing more.

use warden_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: &'static str,
    pub detail: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential or session rejected (401)
    #[error("Unauthorized: {detail} {location}")]
    Unauthorized {
        detail: &'static str,
        location: ErrorLocation,
    },

    /// Rate limited or locked out (429)
    #[error("Too many requests: {detail}, retry after {retry_after_secs}s {location}")]
    TooManyRequests {
        detail: &'static str,
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    /// Session store unreachable (503)
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body, retry_after) = match self {
            ApiError::Unauthorized { detail, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorResponse {
                    error: "Unauthorized",
                    detail: detail.to_string(),
                },
                None,
            ),
            ApiError::TooManyRequests {
                detail,
                retry_after_secs,
                ..
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                ApiErrorResponse {
                    error: "TooManyRequests",
                    detail: detail.to_string(),
                },
                Some(retry_after_secs),
            ),
            ApiError::ServiceUnavailable { message, .. } => {
                // Store details stay in the log
                log::error!("Session store unavailable: {}", message);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiErrorResponse {
                        error: "ServiceUnavailable",
                        detail: "StoreUnavailable".to_string(),
                    },
                    None,
                )
            }
            ApiError::Internal { message, .. } => {
                log::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse {
                        error: "InternalError",
                        detail: "Internal server error".to_string(),
                    },
                    None,
                )
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Convert gate rejections to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            AuthError::RateLimited { .. } | AuthError::AccountLocked { .. } => {
                ApiError::TooManyRequests {
                    detail: e.detail(),
                    retry_after_secs: e.retry_after_secs().unwrap_or(1),
                    location,
                }
            }
            AuthError::StoreUnavailable { message, .. } => {
                ApiError::ServiceUnavailable { message, location }
            }
            other => ApiError::Unauthorized {
                detail: other.detail(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
