use crate::{
    AbuseConfig, AuthConfig, CONFIG_DIR_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, RateLimitConfig, RevocationConfig, ServerConfig,
    SessionCacheConfig, SweeperConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub session_cache: SessionCacheConfig,
    pub revocation: RevocationConfig,
    pub abuse: AbuseConfig,
    pub rate_limit: RateLimitConfig,
    pub sweeper: SweeperConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for WARDEN_CONFIG_DIR env var, else use ./.warden/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply WARDEN_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: WARDEN_CONFIG_DIR env var > ./.warden/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.session_cache.validate()?;
        self.revocation.validate()?;
        self.abuse.validate()?;
        self.rate_limit.validate()?;
        self.sweeper.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (trust X-Forwarded-For: {})",
            self.server.host, self.server.port, self.server.trust_forwarded_for
        );
        info!("  database: {}", self.database.path);

        info!(
            "  auth: HS256 secret {}, leeway={}s, enforcement {}",
            if self.auth.jwt_secret.is_some() {
                "set"
            } else {
                "MISSING"
            },
            self.auth.leeway_secs,
            if self.auth.enforcement_enabled {
                "enabled"
            } else {
                "disabled (advisory only)"
            }
        );

        info!(
            "  session_cache: capacity={}, ttl={}s",
            self.session_cache.capacity, self.session_cache.ttl_secs
        );

        info!(
            "  revocation: capacity={}, ttl={}s",
            self.revocation.capacity, self.revocation.ttl_secs
        );

        info!(
            "  abuse: threshold={}, lockout={}s, window={}s",
            self.abuse.threshold, self.abuse.lockout_secs, self.abuse.failure_window_secs
        );

        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );

        info!(
            "  sweeper: every {}s, chunk={}",
            self.sweeper.interval_secs, self.sweeper.chunk_size
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("WARDEN_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("WARDEN_SERVER_PORT", &mut self.server.port);
        Self::apply_env_bool(
            "WARDEN_SERVER_TRUST_FORWARDED_FOR",
            &mut self.server.trust_forwarded_for,
        );

        // Database
        Self::apply_env_string("WARDEN_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("WARDEN_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse("WARDEN_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_bool(
            "WARDEN_AUTH_ENFORCEMENT_ENABLED",
            &mut self.auth.enforcement_enabled,
        );

        // Session cache
        Self::apply_env_parse(
            "WARDEN_SESSION_CACHE_CAPACITY",
            &mut self.session_cache.capacity,
        );
        Self::apply_env_parse(
            "WARDEN_SESSION_CACHE_TTL_SECS",
            &mut self.session_cache.ttl_secs,
        );

        // Revocation
        Self::apply_env_parse("WARDEN_REVOCATION_CAPACITY", &mut self.revocation.capacity);
        Self::apply_env_parse("WARDEN_REVOCATION_TTL_SECS", &mut self.revocation.ttl_secs);

        // Abuse
        Self::apply_env_parse("WARDEN_ABUSE_THRESHOLD", &mut self.abuse.threshold);
        Self::apply_env_parse("WARDEN_ABUSE_LOCKOUT_SECS", &mut self.abuse.lockout_secs);
        Self::apply_env_parse(
            "WARDEN_ABUSE_FAILURE_WINDOW_SECS",
            &mut self.abuse.failure_window_secs,
        );
        Self::apply_env_parse("WARDEN_ABUSE_CAPACITY", &mut self.abuse.capacity);

        // Rate limit
        Self::apply_env_parse(
            "WARDEN_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "WARDEN_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Sweeper
        Self::apply_env_parse(
            "WARDEN_SWEEPER_INTERVAL_SECS",
            &mut self.sweeper.interval_secs,
        );
        Self::apply_env_parse("WARDEN_SWEEPER_CHUNK_SIZE", &mut self.sweeper.chunk_size);

        // Logging
        Self::apply_env_parse("WARDEN_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("WARDEN_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("WARDEN_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
