use crate::ApiError;

use warden_auth::AuthError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::{StatusCode, header};
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_fingerprint_mismatch_when_converted_then_401_with_detail() {
    let error = ApiError::from(AuthError::FingerprintMismatch {
        session_id: "S1".into(),
        location: here(),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Unauthorized");
    assert_eq!(json["detail"], "FingerprintMismatch");
}

#[tokio::test]
async fn given_rejection_when_converted_then_body_does_not_leak_session_id() {
    let error = ApiError::from(AuthError::SessionNotFound {
        session_id: "secret-session-id".into(),
        location: here(),
    });
    let response = error.into_response();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!text.contains("secret-session-id"));
    assert!(text.contains("SessionNotFound"));
}

#[tokio::test]
async fn given_account_locked_when_converted_then_429_with_retry_after() {
    let error = ApiError::from(AuthError::AccountLocked {
        retry_after_secs: 840,
        location: here(),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "840");

    let json = body_json(response).await;
    assert_eq!(json["error"], "TooManyRequests");
    assert_eq!(json["detail"], "AccountLocked");
}

#[tokio::test]
async fn given_rate_limited_when_converted_then_retry_after_is_window() {
    let error = ApiError::from(AuthError::RateLimited {
        limit: 100,
        window_secs: 60,
        location: here(),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "60");
}

#[tokio::test]
async fn given_store_unavailable_when_converted_then_503_without_internal_message() {
    let error = ApiError::from(AuthError::StoreUnavailable {
        message: "pool timed out at /var/db".into(),
        location: here(),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "ServiceUnavailable");
    assert_eq!(json["detail"], "StoreUnavailable");
}
