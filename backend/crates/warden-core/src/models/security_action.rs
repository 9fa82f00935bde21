use crate::{CoreError, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Kind of authentication-relevant event written to the security log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityAction {
    AuthSuccess,
    InvalidTokenFormat,
    InvalidSignature,
    TokenExpired,
    MissingClaims,
    RevokedTokenUsed,
    SessionNotFound,
    SessionExpired,
    FingerprintMismatch,
    UserAgentChanged,
    AccountLocked,
    RateLimited,
    Logout,
}

impl SecurityAction {
    pub const ALL: [SecurityAction; 13] = [
        Self::AuthSuccess,
        Self::InvalidTokenFormat,
        Self::InvalidSignature,
        Self::TokenExpired,
        Self::MissingClaims,
        Self::RevokedTokenUsed,
        Self::SessionNotFound,
        Self::SessionExpired,
        Self::FingerprintMismatch,
        Self::UserAgentChanged,
        Self::AccountLocked,
        Self::RateLimited,
        Self::Logout,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthSuccess => "AUTH_SUCCESS",
            Self::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingClaims => "MISSING_CLAIMS",
            Self::RevokedTokenUsed => "REVOKED_TOKEN_USED",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::FingerprintMismatch => "FINGERPRINT_MISMATCH",
            Self::UserAgentChanged => "USER_AGENT_CHANGED",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::RateLimited => "RATE_LIMITED",
            Self::Logout => "LOGOUT",
        }
    }
}

impl fmt::Display for SecurityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityAction {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSecurityAction {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
