//! Axum extractor that runs the request gate

use crate::ApiError;
use crate::AppState;
use crate::api::extractors::client_info;

use warden_auth::AuthContext;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// An authenticated caller. Taking this as a handler argument puts the
/// route behind the gate; a rejection short-circuits with the mapped error.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub context: AuthContext,
    pub client_ip: String,
    pub user_agent: Option<String>,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let request = client_info::auth_request(parts, state.trust_forwarded_for);

            let context = match parts.extensions.get::<AuthContext>().cloned() {
                Some(context) => context,
                None => {
                    let context = state.guard.authenticate(&request).await?;
                    // Later extractors in the same request reuse this
                    parts.extensions.insert(context.clone());
                    context
                }
            };

            Ok(Authenticated {
                context,
                client_ip: request.client_ip,
                user_agent: request.user_agent,
            })
        }
    }
}
