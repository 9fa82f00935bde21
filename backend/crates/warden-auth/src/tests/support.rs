use crate::{AuthGuard, GuardConfig, ManualClock};

use warden_core::{
    SecurityAction, SecurityEvent, Session, SessionStatus, SessionStore, SessionWithUser,
    StoreError, StoreResult, UserIdentity,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub(crate) const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const CLIENT_IP: &str = "10.0.0.5";
pub(crate) const USER_AGENT: &str = "uaA";

/// In-memory store that counts calls and can be told to fail
#[derive(Default)]
pub(crate) struct FakeStore {
    sessions: Mutex<HashMap<String, SessionWithUser>>,
    events: Mutex<Vec<SecurityEvent>>,
    find_calls: AtomicUsize,
    pub(crate) fail_lookups: AtomicBool,
    pub(crate) fail_event_writes: AtomicBool,
    pub(crate) fail_sweeps: AtomicBool,
    pub(crate) lookup_delay_ms: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn insert(&self, session: Session, role: &str) {
        let user = UserIdentity {
            user_id: session.user_id.clone(),
            role: role.to_string(),
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), SessionWithUser { session, user });
    }

    pub(crate) fn session(&self, id: &str) -> Option<Session> {
        self.sessions
            .lock()
            .unwrap()
            .get(id)
            .map(|entry| entry.session.clone())
    }

    /// Flip a session to EXPIRED without touching its `expires_at`, the way
    /// another node or an admin tool would
    pub(crate) fn retire(&self, id: &str) {
        if let Some(entry) = self.sessions.lock().unwrap().get_mut(id) {
            entry.session.status = SessionStatus::Expired;
        }
    }

    pub(crate) fn events(&self) -> Vec<SecurityEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn count_events(&self, action: SecurityAction) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.action == action)
            .count()
    }

    pub(crate) fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn find_session_by_id(&self, id: &str) -> StoreResult<Option<SessionWithUser>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.lookup_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }

        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("lookup refused"));
        }
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn find_active_sessions_past_expiry(
        &self,
        now: DateTime<Utc>,
        chunk_size: u32,
    ) -> StoreResult<Vec<Session>> {
        if self.fail_sweeps.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("sweep refused"));
        }

        let mut due: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .map(|entry| entry.session.clone())
            .filter(|session| session.status == SessionStatus::Active && session.expires_at <= now)
            .collect();
        due.sort_by_key(|session| session.expires_at);
        due.truncate(chunk_size as usize);
        Ok(due)
    }

    async fn find_active_session_ids(&self, ids: &[String]) -> StoreResult<Vec<String>> {
        if self.fail_sweeps.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("sweep refused"));
        }

        let sessions = self.sessions.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| {
                sessions
                    .get(*id)
                    .is_some_and(|entry| entry.session.status == SessionStatus::Active)
            })
            .cloned()
            .collect())
    }

    async fn mark_sessions_expired(&self, ids: &[String]) -> StoreResult<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut updated = 0;
        for id in ids {
            if let Some(entry) = sessions.get_mut(id)
                && entry.session.status == SessionStatus::Active
            {
                entry.session.status = SessionStatus::Expired;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn append_security_event(&self, event: &SecurityEvent) -> StoreResult<()> {
        if self.fail_event_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("audit log refused"));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn bind_session_user_agent(&self, id: &str, user_agent: &str) -> StoreResult<()> {
        if let Some(entry) = self.sessions.lock().unwrap().get_mut(id)
            && entry.session.user_agent.is_none()
        {
            entry.session.user_agent = Some(user_agent.to_string());
        }
        Ok(())
    }
}

/// Manual clock starting at the current second, so the signature library's
/// own wall-clock expiry check agrees with it
pub(crate) fn test_clock() -> Arc<ManualClock> {
    let now = DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();
    Arc::new(ManualClock::new(now))
}

pub(crate) fn minutes(n: i64) -> TimeDelta {
    TimeDelta::minutes(n)
}

/// ACTIVE session bound to fingerprint `"<CLIENT_IP>|uaA"` and user-agent `uaA`
pub(crate) fn active_session(id: &str, user_id: &str, expires_at: DateTime<Utc>) -> Session {
    Session {
        id: id.to_string(),
        user_id: user_id.to_string(),
        status: SessionStatus::Active,
        fingerprint: Some(format!("{}|{}", CLIENT_IP, USER_AGENT)),
        user_agent: Some(USER_AGENT.to_string()),
        expires_at,
        created_at: expires_at - minutes(60),
    }
}

pub(crate) fn claims(session_id: &str, user_id: &str, exp: DateTime<Utc>) -> Value {
    json!({
        "sessionId": session_id,
        "userId": user_id,
        "exp": exp.timestamp(),
    })
}

pub(crate) fn mint(claims: &Value) -> String {
    mint_with(claims, SECRET, Algorithm::HS256)
}

pub(crate) fn mint_with(claims: &Value, secret: &[u8], algorithm: Algorithm) -> String {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

pub(crate) fn config_with_enforcement(enforcement_enabled: bool) -> GuardConfig {
    GuardConfig {
        enforcement_enabled,
        ..GuardConfig::default()
    }
}

pub(crate) fn build_guard(
    store: &Arc<FakeStore>,
    clock: &Arc<ManualClock>,
    config: GuardConfig,
) -> AuthGuard {
    AuthGuard::with_clock(SECRET, store.clone(), config, clock.clone())
}
