#![allow(dead_code)]

//! Test infrastructure for warden-server HTTP tests

use warden_auth::{AuthGuard, GuardConfig};
use warden_core::{Session, SessionStatus, UserIdentity};
use warden_db::{SessionRepository, SqliteSessionStore, UserRepository};
use warden_server::{AppState, build_router};

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// HS256 requires at least 32 bytes
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";
pub const CLIENT_IP: &str = "203.0.113.7";
pub const USER_AGENT: &str = "warden-tests/1.0";
pub const SESSION_ID: &str = "session-1";
pub const USER_ID: &str = "user-1";

/// Test server with access to AppState for testing
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    warden_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Build the router over a fresh database. Client IPs come from
/// `X-Forwarded-For` so tests can choose them.
pub async fn create_test_app(config: GuardConfig) -> TestApp {
    let pool = create_test_pool().await;
    let store = Arc::new(SqliteSessionStore::new(pool.clone()));
    let guard = Arc::new(AuthGuard::new(TEST_JWT_SECRET, store, config));

    let state = AppState {
        guard,
        pool,
        metrics: PrometheusBuilder::new().build_recorder().handle(),
        trust_forwarded_for: true,
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state.clone()))
        .expect("Failed to create test server");

    TestApp { server, state }
}

pub fn enforcing() -> GuardConfig {
    GuardConfig {
        enforcement_enabled: true,
        ..GuardConfig::default()
    }
}

/// Fingerprint the gate derives for requests sent with the default headers
pub fn default_fingerprint() -> String {
    format!("{}|{}", CLIENT_IP, USER_AGENT)
}

/// Seed the default user and an ACTIVE session bound to the default fingerprint
pub async fn seed_session(pool: &SqlitePool, expires_at: DateTime<Utc>) {
    let user = UserIdentity {
        user_id: USER_ID.to_string(),
        role: "ADMIN".to_string(),
    };
    UserRepository::create(pool, &user, "user-1@example.com")
        .await
        .expect("Failed to create test user");

    let session = Session {
        id: SESSION_ID.to_string(),
        user_id: USER_ID.to_string(),
        status: SessionStatus::Active,
        fingerprint: Some(default_fingerprint()),
        user_agent: Some(USER_AGENT.to_string()),
        expires_at,
        created_at: Utc::now(),
    };
    SessionRepository::create(pool, &session)
        .await
        .expect("Failed to create test session");
}

pub fn create_token(session_id: &str, user_id: &str, exp: DateTime<Utc>) -> String {
    encode(
        &Header::default(),
        &json!({
            "sessionId": session_id,
            "userId": user_id,
            "exp": exp.timestamp(),
        }),
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("Failed to encode token")
}

/// Token for the seeded session, valid for 30 minutes
pub fn valid_token() -> String {
    create_token(SESSION_ID, USER_ID, Utc::now() + TimeDelta::minutes(30))
}

pub fn in_minutes(n: i64) -> DateTime<Utc> {
    Utc::now() + TimeDelta::minutes(n)
}
