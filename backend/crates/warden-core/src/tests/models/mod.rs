mod fingerprint;
mod security_action;
mod session;
mod session_status;
