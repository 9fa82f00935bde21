use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, setup_valid_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _secret = EnvGuard::remove("WARDEN_AUTH_JWT_SECRET");
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert!(config.auth.jwt_secret.is_none());
    assert_that!(config.auth.enforcement_enabled, eq(false));
    assert_that!(config.session_cache.ttl_secs, eq(300));
    assert_that!(config.revocation.ttl_secs, eq(86_400));
    assert_that!(config.abuse.threshold, eq(5));
    assert_that!(config.sweeper.interval_secs, eq(3600));
}

#[test]
#[serial]
fn given_secret_in_env_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_valid_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [server]
              port = 9000

              [auth]
              jwt_secret = "0123456789abcdef0123456789abcdef"
              enforcement_enabled = true

              [session_cache]
              capacity = 250
              ttl_secs = 60

              [sweeper]
              chunk_size = 50
          "#,
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.auth.enforcement_enabled, eq(true));
    assert_that!(config.session_cache.capacity, eq(250));
    assert_that!(config.session_cache.ttl_secs, eq(60));
    assert_that!(config.sweeper.chunk_size, eq(50));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [abuse]
              threshold = 10
          "#,
    )
    .unwrap();
    let _threshold = EnvGuard::set("WARDEN_ABUSE_THRESHOLD", "3");
    let _enforce = EnvGuard::set("WARDEN_AUTH_ENFORCEMENT_ENABLED", "1");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.abuse.threshold, eq(3));
    assert_that!(config.auth.enforcement_enabled, eq(true));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_default() {
    // Given
    let _temp = setup_config_dir();
    let _ttl = EnvGuard::set("WARDEN_SESSION_CACHE_TTL_SECS", "five minutes");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.session_cache.ttl_secs, eq(300));
}

#[test]
#[serial]
fn given_log_file_env_when_load_then_logging_file_set() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("WARDEN_LOG_FILE", "warden.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.logging.file.as_deref(), Some("warden.log"));
}

#[test]
#[serial]
fn given_config_dir_env_when_database_path_then_joined_to_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.database_path().unwrap();

    // Then
    assert_eq!(path, temp.path().join("data.db"));
}
