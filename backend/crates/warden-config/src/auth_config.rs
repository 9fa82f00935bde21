use crate::{ConfigError, ConfigErrorResult, DEFAULT_ENFORCEMENT_ENABLED};

use serde::Deserialize;

// Auth constraints
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
pub const MAX_LEEWAY_SECS: u64 = 300;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Required: the server refuses to start without it.
    pub jwt_secret: Option<String>,
    /// Clock skew tolerated by the signature library's own expiry check
    pub leeway_secs: u64,
    /// Whether brute-force lockout and per-user rate limiting reject requests.
    /// When false both still count and log, but always allow.
    pub enforcement_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            leeway_secs: 0,
            enforcement_enabled: DEFAULT_ENFORCEMENT_ENABLED,
        }
    }
}

// Hand-written so the secret never reaches a log line through `{:?}`.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("leeway_secs", &self.leeway_secs)
            .field("enforcement_enabled", &self.enforcement_enabled)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some(secret) = self.jwt_secret.as_deref() else {
            return Err(ConfigError::auth(
                "auth.jwt_secret is required (set WARDEN_AUTH_JWT_SECRET)",
            ));
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be 0-{}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        Ok(())
    }
}
