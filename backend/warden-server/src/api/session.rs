use crate::{ApiResult, AppState, Authenticated};

use axum::{Json, extract::State, http::StatusCode};
use log::info;
use serde::Serialize;

/// Identity attached to the current request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub role: String,
    pub session_id: String,
}

/// GET /api/me
pub async fn me(auth: Authenticated) -> Json<MeResponse> {
    let Authenticated { context, .. } = auth;

    Json(MeResponse {
        user_id: context.identity.user_id,
        role: context.identity.role,
        session_id: context.session_id,
    })
}

/// POST /api/logout - retire the session and refuse this credential from now on
pub async fn logout(State(state): State<AppState>, auth: Authenticated) -> ApiResult<StatusCode> {
    state
        .guard
        .logout(&auth.context, &auth.client_ip, auth.user_agent.as_deref())
        .await?;

    info!("Session {} logged out", auth.context.session_id);
    Ok(StatusCode::NO_CONTENT)
}
