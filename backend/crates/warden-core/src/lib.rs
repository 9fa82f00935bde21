pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::fingerprint::Fingerprint;
pub use models::security_action::SecurityAction;
pub use models::security_event::SecurityEvent;
pub use models::session::Session;
pub use models::session_status::SessionStatus;
pub use models::session_with_user::SessionWithUser;
pub use models::user_identity::UserIdentity;
pub use store::session_store::SessionStore;
pub use store::store_error::{Result as StoreResult, StoreError};

#[cfg(test)]
mod tests;
