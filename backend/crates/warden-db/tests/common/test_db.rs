use warden_core::UserIdentity;
use warden_db::UserRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    warden_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a user so sessions can reference it
pub async fn create_test_user(pool: &SqlitePool, user_id: &str, role: &str) {
    let user = UserIdentity {
        user_id: user_id.to_string(),
        role: role.to_string(),
    };
    UserRepository::create(pool, &user, &format!("{}@example.com", user_id))
        .await
        .expect("Failed to create test user");
}
