use warden_core::{ErrorLocation, SecurityAction};

use thiserror::Error;

/// Every way the request gate can refuse a request.
///
/// All variants except `StoreUnavailable` belong to the public rejection
/// taxonomy; `detail()` returns the stable name sent to clients.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No credential presented {location}")]
    NoCredential { location: ErrorLocation },

    #[error("Malformed credential: {message} {location}")]
    MalformedCredential {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential signature verification failed {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Credential is missing required claim '{claim}' {location}")]
    IncompleteClaims {
        claim: &'static str,
        location: ErrorLocation,
    },

    #[error("Credential expired {location}")]
    CredentialExpired { location: ErrorLocation },

    #[error("Credential has been revoked {location}")]
    CredentialRevoked { location: ErrorLocation },

    #[error("Session not found: {session_id} {location}")]
    SessionNotFound {
        session_id: String,
        location: ErrorLocation,
    },

    #[error("Session expired: {session_id} {location}")]
    SessionExpired {
        session_id: String,
        location: ErrorLocation,
    },

    #[error("Device fingerprint mismatch for session {session_id} {location}")]
    FingerprintMismatch {
        session_id: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_secs}s {location}")]
    RateLimited {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Too many failed attempts, locked for {retry_after_secs}s {location}")]
    AccountLocked {
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    #[error("Session store unavailable: {message} {location}")]
    StoreUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable rejection name, safe to return to clients
    pub fn detail(&self) -> &'static str {
        match self {
            Self::NoCredential { .. } => "NoCredential",
            Self::MalformedCredential { .. } => "MalformedCredential",
            Self::InvalidSignature { .. } => "InvalidSignature",
            Self::IncompleteClaims { .. } => "IncompleteClaims",
            Self::CredentialExpired { .. } => "CredentialExpired",
            Self::CredentialRevoked { .. } => "CredentialRevoked",
            Self::SessionNotFound { .. } => "SessionNotFound",
            Self::SessionExpired { .. } => "SessionExpired",
            Self::FingerprintMismatch { .. } => "FingerprintMismatch",
            Self::RateLimited { .. } => "RateLimited",
            Self::AccountLocked { .. } => "AccountLocked",
            Self::StoreUnavailable { .. } => "StoreUnavailable",
        }
    }

    /// Audit action recorded for this rejection, if any.
    /// Anonymous requests and store outages are not attributable.
    pub fn security_action(&self) -> Option<SecurityAction> {
        match self {
            Self::NoCredential { .. } | Self::StoreUnavailable { .. } => None,
            Self::MalformedCredential { .. } => Some(SecurityAction::InvalidTokenFormat),
            Self::InvalidSignature { .. } => Some(SecurityAction::InvalidSignature),
            Self::IncompleteClaims { .. } => Some(SecurityAction::MissingClaims),
            Self::CredentialExpired { .. } => Some(SecurityAction::TokenExpired),
            Self::CredentialRevoked { .. } => Some(SecurityAction::RevokedTokenUsed),
            Self::SessionNotFound { .. } => Some(SecurityAction::SessionNotFound),
            Self::SessionExpired { .. } => Some(SecurityAction::SessionExpired),
            Self::FingerprintMismatch { .. } => Some(SecurityAction::FingerprintMismatch),
            Self::RateLimited { .. } => Some(SecurityAction::RateLimited),
            Self::AccountLocked { .. } => Some(SecurityAction::AccountLocked),
        }
    }

    /// Whether this rejection feeds the abuse tracker's failure path.
    /// Throttling outcomes and our own outages never do.
    pub fn counts_as_failed_attempt(&self) -> bool {
        !matches!(
            self,
            Self::RateLimited { .. } | Self::AccountLocked { .. } | Self::StoreUnavailable { .. }
        )
    }

    /// Seconds a throttled client should wait before retrying
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { window_secs, .. } => Some(*window_secs),
            Self::AccountLocked {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
