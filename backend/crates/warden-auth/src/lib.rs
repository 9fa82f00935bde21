pub mod abuse_tracker;
pub mod auth_context;
pub mod auth_guard;
pub mod auth_request;
pub mod claims;
pub mod clock;
pub mod credential_verifier;
pub mod error;
pub mod guard_config;
pub mod metrics;
pub mod rate_limit_config;
pub mod revocation_set;
pub mod security_event_recorder;
pub mod session_cache;
pub mod session_sweeper;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod ttl_lru_cache;
pub mod user_rate_limiter;

pub use abuse_tracker::AbuseTracker;
pub use auth_context::AuthContext;
pub use auth_guard::AuthGuard;
pub use auth_request::AuthRequest;
pub use claims::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credential_verifier::CredentialVerifier;
pub use error::{AuthError, Result};
pub use guard_config::{AbuseSettings, CacheSettings, GuardConfig, SweeperSettings};
pub use metrics::AuthMetrics;
pub use rate_limit_config::RateLimitConfig;
pub use revocation_set::RevocationSet;
pub use security_event_recorder::SecurityEventRecorder;
pub use session_cache::SessionCache;
pub use session_sweeper::{SessionSweeper, SweepReport};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use ttl_lru_cache::TtlLruCache;
pub use user_rate_limiter::UserRateLimiter;

#[cfg(test)]
mod tests;
