pub mod session_store;
pub mod store_error;
