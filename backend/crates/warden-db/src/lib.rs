pub mod connection;
pub mod error;
pub mod repositories;
pub mod sqlite_session_store;

pub use connection::sqlite_pool::{open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::security_event_repository::SecurityEventRepository;
pub use repositories::session_repository::SessionRepository;
pub use repositories::user_repository::UserRepository;
pub use sqlite_session_store::SqliteSessionStore;
