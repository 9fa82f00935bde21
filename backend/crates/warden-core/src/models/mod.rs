pub mod fingerprint;
pub mod security_action;
pub mod security_event;
pub mod session;
pub mod session_status;
pub mod session_with_user;
pub mod user_identity;
