use serde::{Deserialize, Serialize};

/// The resolved identity attached to an authenticated request.
/// Downstream authorization reads `role`; this crate never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    pub role: String,
}
