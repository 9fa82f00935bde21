use crate::{Session, UserIdentity};

use serde::{Deserialize, Serialize};

/// A session joined with its owning user's identity and role.
/// This is the value the session cache stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWithUser {
    pub session: Session,
    pub user: UserIdentity,
}
