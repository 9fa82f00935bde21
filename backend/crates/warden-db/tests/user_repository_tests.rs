mod common;

use common::{create_test_pool, create_test_user};

use warden_db::UserRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_created_user_when_found_by_id_then_role_returned() {
    // Given
    let pool = create_test_pool().await;
    create_test_user(&pool, "u1", "AUDITOR").await;

    // When
    let found = UserRepository::find_by_id(&pool, "u1").await.unwrap();

    // Then
    assert_that!(found, some(anything()));
    let found = found.unwrap();
    assert_that!(found.user_id, eq("u1"));
    assert_that!(found.role, eq("AUDITOR"));
}

#[tokio::test]
async fn given_unknown_user_when_found_by_id_then_none() {
    // Given
    let pool = create_test_pool().await;

    // When
    let found = UserRepository::find_by_id(&pool, "ghost").await.unwrap();

    // Then
    assert_that!(found, none());
}

#[tokio::test]
async fn given_duplicate_email_when_created_then_error() {
    // Given
    let pool = create_test_pool().await;
    create_test_user(&pool, "u1", "USER").await;
    let other = warden_core::UserIdentity {
        user_id: "u2".to_string(),
        role: "USER".to_string(),
    };

    // When
    let result = UserRepository::create(&pool, &other, "u1@example.com").await;

    // Then
    assert_that!(result, err(anything()));
}
