use crate::{
    AbuseTracker, AuthContext, AuthError, AuthMetrics, AuthRequest, Clock, CredentialVerifier,
    GuardConfig, Result as AuthErrorResult, RevocationSet, SecurityEventRecorder, SessionCache,
    SessionSweeper, ShutdownCoordinator, SweepReport, SystemClock, UserRateLimiter,
};

use warden_core::{Fingerprint, SecurityAction, SessionStore, SessionWithUser};

use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

/// The request gate. Built once at startup and shared (`Arc<AuthGuard>`)
/// by every request handler; owns all in-memory security state and the
/// background sweeper.
pub struct AuthGuard {
    verifier: CredentialVerifier,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    session_cache: Arc<SessionCache>,
    revocations: Arc<RevocationSet>,
    abuse: Arc<AbuseTracker>,
    rate_limiter: Arc<UserRateLimiter>,
    recorder: SecurityEventRecorder,
    sweeper: Arc<SessionSweeper>,
    config: GuardConfig,
    metrics: AuthMetrics,
    shutdown: ShutdownCoordinator,
    sweeper_task: Mutex<Option<JoinHandle<()>>>,
}

impl AuthGuard {
    pub fn new(secret: &[u8], store: Arc<dyn SessionStore>, config: GuardConfig) -> Self {
        Self::with_clock(secret, store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        secret: &[u8],
        store: Arc<dyn SessionStore>,
        config: GuardConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let metrics = AuthMetrics::new();

        let session_cache = Arc::new(SessionCache::new(
            config.session_cache.capacity,
            config.session_cache.ttl,
            clock.clone(),
        ));
        let revocations = Arc::new(RevocationSet::new(
            config.revocation.capacity,
            config.revocation.ttl,
            clock.clone(),
        ));
        let abuse = Arc::new(AbuseTracker::new(config.abuse.clone(), clock.clone()));
        let rate_limiter = Arc::new(UserRateLimiter::new(config.rate_limit.clone()));

        let sweeper = Arc::new(SessionSweeper::new(
            store.clone(),
            session_cache.clone(),
            revocations.clone(),
            abuse.clone(),
            rate_limiter.clone(),
            clock.clone(),
            config.sweeper.chunk_size,
            metrics.clone(),
        ));

        Self {
            verifier: CredentialVerifier::with_hs256(secret, config.leeway_secs, clock.clone()),
            recorder: SecurityEventRecorder::new(store.clone(), clock.clone(), metrics.clone()),
            store,
            clock,
            session_cache,
            revocations,
            abuse,
            rate_limiter,
            sweeper,
            config,
            metrics,
            shutdown: ShutdownCoordinator::new(),
            sweeper_task: Mutex::new(None),
        }
    }

    /// Run the full gate for one request.
    ///
    /// Every rejection is handled here: audited, counted against the client
    /// IP where it is a failed attempt, and returned for the transport to
    /// turn into a response.
    pub async fn authenticate(&self, request: &AuthRequest) -> AuthErrorResult<AuthContext> {
        let mut attributed_user: Option<String> = None;

        match self.run_gate(request, &mut attributed_user).await {
            Ok(context) => {
                self.recorder
                    .record(
                        SecurityAction::AuthSuccess,
                        Some(&context.identity.user_id),
                        &request.client_ip,
                        request.user_agent.as_deref(),
                    )
                    .await;
                self.abuse.clear(&request.client_ip);
                self.metrics.auth_succeeded();
                debug!(
                    "Authenticated user {} (session {}) from {}",
                    context.identity.user_id, context.session_id, request.client_ip
                );
                Ok(context)
            }
            Err(err) => {
                self.reject(&err, attributed_user.as_deref(), request).await;
                Err(err)
            }
        }
    }

    async fn run_gate(
        &self,
        request: &AuthRequest,
        attributed_user: &mut Option<String>,
    ) -> AuthErrorResult<AuthContext> {
        let ip = request.client_ip.as_str();

        if let Some(until) = self.abuse.locked_until(ip) {
            let retry_after_secs = (until - self.clock.now()).num_seconds().max(1) as u64;
            if self.config.enforcement_enabled {
                return Err(AuthError::AccountLocked {
                    retry_after_secs,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            warn!(
                "{} is locked out for {}s (enforcement disabled, allowing)",
                ip, retry_after_secs
            );
        }

        let Some(token) = request.credential() else {
            return Err(AuthError::NoCredential {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if self.revocations.contains(token) {
            return Err(AuthError::CredentialRevoked {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let claims = self.verifier.verify(token)?;
        *attributed_user = Some(claims.user_id.clone());

        let entry = self.resolve_session(&claims.session_id).await?;
        let session = &entry.session;

        if session.user_id != claims.user_id {
            warn!(
                "Credential for user {} references session {} owned by {}",
                claims.user_id, session.id, session.user_id
            );
            return Err(AuthError::SessionNotFound {
                session_id: claims.session_id.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let now = self.clock.now();
        if !session.is_usable(now) {
            self.session_cache.evict(&session.id);
            if session.is_past_expiry(now) && session.status.is_active() {
                self.expire_lazily(&session.id).await;
            }
            return Err(AuthError::SessionExpired {
                session_id: session.id.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.check_fingerprint(&entry, claims.fingerprint.as_deref(), request)?;
        self.check_user_agent(&entry, request).await;

        if !self.rate_limiter.allow(&entry.user.user_id) {
            let limit = self.rate_limiter.config();
            if self.config.enforcement_enabled {
                return Err(AuthError::RateLimited {
                    limit: limit.max_requests,
                    window_secs: limit.window_secs,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            warn!(
                "User {} exceeded {} requests per {}s (enforcement disabled, allowing)",
                entry.user.user_id, limit.max_requests, limit.window_secs
            );
        }

        Ok(AuthContext {
            identity: entry.user.clone(),
            session_id: session.id.clone(),
            credential: token.to_string(),
        })
    }

    /// Cache first, then the store. Concurrent misses for one id may each
    /// query the store; re-populating is idempotent.
    async fn resolve_session(&self, session_id: &str) -> AuthErrorResult<SessionWithUser> {
        if let Some(entry) = self.session_cache.get(session_id) {
            self.metrics.session_cache_hit();
            return Ok(entry);
        }
        self.metrics.session_cache_miss();

        let found = self
            .store
            .find_session_by_id(session_id)
            .await
            .map_err(|e| AuthError::StoreUnavailable {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let Some(entry) = found else {
            return Err(AuthError::SessionNotFound {
                session_id: session_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.session_cache.put(entry.clone());
        Ok(entry)
    }

    async fn expire_lazily(&self, session_id: &str) {
        if let Err(e) = self
            .store
            .mark_sessions_expired(&[session_id.to_string()])
            .await
        {
            warn!("Failed to mark session {} expired: {}", session_id, e);
        }
    }

    /// Hard check. The session's bound fingerprint wins; the credential's
    /// claim is the fallback, and the two must agree when both exist.
    fn check_fingerprint(
        &self,
        entry: &SessionWithUser,
        claimed: Option<&str>,
        request: &AuthRequest,
    ) -> AuthErrorResult<()> {
        let bound = entry.session.fingerprint.as_deref();

        let consistent = match (bound, claimed) {
            (Some(bound), Some(claimed)) => Fingerprint::matches(bound, claimed),
            _ => true,
        };

        let matches = match bound.or(claimed) {
            Some(expected) => {
                consistent && Fingerprint::matches(expected, &request.presented_fingerprint())
            }
            None => true,
        };

        if matches {
            return Ok(());
        }

        self.session_cache.evict(&entry.session.id);
        Err(AuthError::FingerprintMismatch {
            session_id: entry.session.id.clone(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Soft check: drift is audited and the cached copy dropped, but the
    /// request proceeds. A session without a user-agent gets this one bound.
    async fn check_user_agent(&self, entry: &SessionWithUser, request: &AuthRequest) {
        let session = &entry.session;
        let current = request.user_agent.as_deref();

        match (session.user_agent.as_deref(), current) {
            (Some(bound), current) if Some(bound) != current => {
                warn!(
                    "User-agent changed for session {} (user {}, ip {})",
                    session.id, entry.user.user_id, request.client_ip
                );
                self.metrics.user_agent_changed();
                self.session_cache.evict(&session.id);
                self.recorder
                    .record(
                        SecurityAction::UserAgentChanged,
                        Some(&entry.user.user_id),
                        &request.client_ip,
                        current,
                    )
                    .await;
            }
            (None, Some(current)) => {
                match self.store.bind_session_user_agent(&session.id, current).await {
                    Ok(()) => {
                        let mut bound = entry.clone();
                        bound.session.user_agent = Some(current.to_string());
                        self.session_cache.put(bound);
                    }
                    Err(e) => warn!(
                        "Failed to bind user-agent to session {}: {}",
                        session.id, e
                    ),
                }
            }
            _ => {}
        }
    }

    async fn reject(&self, err: &AuthError, user_id: Option<&str>, request: &AuthRequest) {
        let ip = request.client_ip.as_str();
        let user_agent = request.user_agent.as_deref();

        self.metrics.auth_rejected(err.detail());
        warn!(
            "Authentication rejected from {}: {} (user {})",
            ip,
            err.detail(),
            user_id.unwrap_or("<unknown>")
        );

        if let Some(action) = err.security_action() {
            self.recorder.record(action, user_id, ip, user_agent).await;
        }

        if err.counts_as_failed_attempt() && !self.abuse.record_and_check(ip) {
            self.metrics.lockout_triggered();
            warn!(
                "{} reached {} failed attempts, locked for {:?}{}",
                ip,
                self.config.abuse.threshold,
                self.config.abuse.lockout,
                if self.config.enforcement_enabled {
                    ""
                } else {
                    " (enforcement disabled)"
                }
            );
        }
    }

    /// Refuse this exact credential from now on
    pub fn revoke(&self, token: &str) {
        self.revocations.add(token);
        info!("Credential revoked");
    }

    /// End the caller's session: revoke the credential, retire the session
    /// in the store and drop it from the cache.
    pub async fn logout(
        &self,
        context: &AuthContext,
        client_ip: &str,
        user_agent: Option<&str>,
    ) -> AuthErrorResult<()> {
        self.revoke(&context.credential);
        self.session_cache.evict(&context.session_id);

        self.store
            .mark_sessions_expired(&[context.session_id.clone()])
            .await
            .map_err(|e| AuthError::StoreUnavailable {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.recorder
            .record(
                SecurityAction::Logout,
                Some(&context.identity.user_id),
                client_ip,
                user_agent,
            )
            .await;

        info!(
            "User {} logged out of session {}",
            context.identity.user_id, context.session_id
        );
        Ok(())
    }

    /// Run one sweep pass now, outside the schedule
    pub async fn sweep_once(&self) -> AuthErrorResult<SweepReport> {
        self.sweeper.sweep_once().await
    }

    /// Start the background sweeper. Returns false if it is already running
    /// or the gate has been shut down.
    pub fn start_sweeper(&self) -> bool {
        if self.shutdown.is_stopped() {
            return false;
        }

        let mut task = self
            .sweeper_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if task.is_some() {
            return false;
        }

        let handle = self.sweeper.clone().spawn(
            self.config.sweeper.interval,
            self.shutdown.subscribe_guard(),
        );
        *task = Some(handle);
        true
    }

    /// Stop the sweeper and wait for it to finish its current pass
    pub async fn shutdown(&self) {
        if !self.shutdown.shutdown() {
            debug!("Shutdown already signalled");
        }

        let handle = self
            .sweeper_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            warn!("Session sweeper task ended abnormally: {}", e);
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn session_cache(&self) -> &SessionCache {
        &self.session_cache
    }

    pub fn revocations(&self) -> &RevocationSet {
        &self.revocations
    }

    pub fn abuse_tracker(&self) -> &AbuseTracker {
        &self.abuse
    }
}
