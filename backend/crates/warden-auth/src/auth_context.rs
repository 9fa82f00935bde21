use warden_core::UserIdentity;

/// What a successful pass through the gate attaches to the request
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub identity: UserIdentity,
    pub session_id: String,
    /// The verified credential, kept so the request can revoke it on logout
    pub credential: String,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("identity", &self.identity)
            .field("session_id", &self.session_id)
            .field("credential", &"<redacted>")
            .finish()
    }
}
