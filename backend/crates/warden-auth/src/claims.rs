use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Claims carried by a session credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub session_id: String,
    pub user_id: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Device fingerprint bound at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Wire form: every claim optional so a missing one is reported as such
/// rather than as a decode failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawClaims {
    session_id: Option<String>,
    user_id: Option<String>,
    exp: Option<i64>,
    fingerprint: Option<String>,
}

impl RawClaims {
    #[track_caller]
    pub(crate) fn into_claims(self) -> AuthErrorResult<Claims> {
        let session_id = required("sessionId", self.session_id)?;
        let user_id = required("userId", self.user_id)?;
        let Some(exp) = self.exp else {
            return Err(AuthError::IncompleteClaims {
                claim: "exp",
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(Claims {
            session_id,
            user_id,
            exp,
            fingerprint: self.fingerprint.filter(|fp| !fp.trim().is_empty()),
        })
    }
}

#[track_caller]
fn required(claim: &'static str, value: Option<String>) -> AuthErrorResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AuthError::IncompleteClaims {
            claim,
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
