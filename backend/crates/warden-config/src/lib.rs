mod abuse_config;
mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod revocation_config;
mod server_config;
mod session_cache_config;
mod sweeper_config;

#[cfg(test)]
mod tests;

pub use abuse_config::AbuseConfig;
pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use revocation_config::RevocationConfig;
pub use server_config::ServerConfig;
pub use session_cache_config::SessionCacheConfig;
pub use sweeper_config::SweeperConfig;

const CONFIG_DIR_ENV: &str = "WARDEN_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".warden";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_ENFORCEMENT_ENABLED: bool = false;
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
