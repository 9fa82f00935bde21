use metrics::{counter, gauge};

/// Metrics for the request gate and its background sweep
#[derive(Clone)]
pub struct AuthMetrics {
    prefix: &'static str,
}

impl AuthMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "warden_auth",
        }
    }

    pub fn auth_succeeded(&self) {
        counter!(format!("{}.requests.authenticated", self.prefix)).increment(1);
    }

    /// `detail` is the rejection name, e.g. "SessionExpired"
    pub fn auth_rejected(&self, detail: &str) {
        counter!(format!("{}.requests.rejected", self.prefix)).increment(1);
        counter!(format!("{}.requests.rejected.{}", self.prefix, detail)).increment(1);
    }

    pub fn session_cache_hit(&self) {
        counter!(format!("{}.session_cache.hits", self.prefix)).increment(1);
    }

    pub fn session_cache_miss(&self) {
        counter!(format!("{}.session_cache.misses", self.prefix)).increment(1);
    }

    pub fn lockout_triggered(&self) {
        counter!(format!("{}.abuse.lockouts", self.prefix)).increment(1);
    }

    pub fn user_agent_changed(&self) {
        counter!(format!("{}.sessions.user_agent_changed", self.prefix)).increment(1);
    }

    pub fn security_event_write_failed(&self) {
        counter!(format!("{}.security_events.write_failures", self.prefix)).increment(1);
    }

    pub fn sweep_completed(&self, expired: u64) {
        counter!(format!("{}.sweeper.runs", self.prefix)).increment(1);
        counter!(format!("{}.sweeper.sessions_expired", self.prefix)).increment(expired);
    }

    pub fn sweep_failed(&self) {
        counter!(format!("{}.sweeper.failures", self.prefix)).increment(1);
    }

    pub fn cache_sizes(&self, sessions: usize, revocations: usize, abuse: usize) {
        gauge!(format!("{}.session_cache.entries", self.prefix)).set(sessions as f64);
        gauge!(format!("{}.revocations.entries", self.prefix)).set(revocations as f64);
        gauge!(format!("{}.abuse.entries", self.prefix)).set(abuse as f64);
    }
}

impl Default for AuthMetrics {
    fn default() -> Self {
        Self::new()
    }
}
