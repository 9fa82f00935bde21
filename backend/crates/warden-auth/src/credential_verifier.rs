use crate::claims::RawClaims;
use crate::{AuthError, Claims, Clock, Result as AuthErrorResult};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

const SEGMENT_COUNT: usize = 3;

/// Verifies HS256 session credentials and extracts their claims.
///
/// Expiry is checked twice: once by the signature library (with leeway) and
/// once against the injected clock with no leeway.
pub struct CredentialVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl CredentialVerifier {
    pub fn with_hs256(secret: &[u8], leeway_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = leeway_secs;
        // Presence of exp is checked after decoding, against the taxonomy
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Three non-empty dot-separated segments
    pub fn is_well_formed(token: &str) -> bool {
        let segments: Vec<&str> = token.split('.').collect();
        segments.len() == SEGMENT_COUNT && segments.iter().all(|segment| !segment.is_empty())
    }

    /// Structural, cryptographic and claims verification. Never mutates shared state.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        if !Self::is_well_formed(token) {
            return Err(AuthError::MalformedCredential {
                message: format!("expected {} segments", SEGMENT_COUNT),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let token_data = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let location = ErrorLocation::from(Location::caller());
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AuthError::InvalidSignature { location }
                    }
                    ErrorKind::ExpiredSignature => AuthError::CredentialExpired { location },
                    ErrorKind::MissingRequiredClaim(_) => AuthError::IncompleteClaims {
                        claim: "exp",
                        location,
                    },
                    _ => AuthError::MalformedCredential {
                        message: e.to_string(),
                        location,
                    },
                }
            })?;

        let claims = token_data.claims.into_claims()?;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(AuthError::CredentialExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }
}
