use crate::{
    AbuseTracker, AuthError, AuthMetrics, Clock, RevocationSet, Result as AuthErrorResult,
    SessionCache, ShutdownGuard, UserRateLimiter,
};

use warden_core::SessionStore;

use std::collections::HashSet;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Outcome of one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Non-empty chunks fetched from the store
    pub chunks: u32,
    /// Sessions flipped to EXPIRED
    pub expired: u64,
    /// Cached sessions dropped because the store no longer has them ACTIVE
    pub evicted_stale: u64,
}

/// Retires sessions that are past their expiry but still ACTIVE, evicts cached
/// sessions the store has already retired, and trims the in-memory caches.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    session_cache: Arc<SessionCache>,
    revocations: Arc<RevocationSet>,
    abuse: Arc<AbuseTracker>,
    rate_limiter: Arc<UserRateLimiter>,
    clock: Arc<dyn Clock>,
    chunk_size: u32,
    metrics: AuthMetrics,
}

impl SessionSweeper {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn SessionStore>,
        session_cache: Arc<SessionCache>,
        revocations: Arc<RevocationSet>,
        abuse: Arc<AbuseTracker>,
        rate_limiter: Arc<UserRateLimiter>,
        clock: Arc<dyn Clock>,
        chunk_size: u32,
        metrics: AuthMetrics,
    ) -> Self {
        Self {
            store,
            session_cache,
            revocations,
            abuse,
            rate_limiter,
            clock,
            chunk_size: chunk_size.max(1),
            metrics,
        }
    }

    /// One full pass, in chunks. Retiring stops at the first short or empty
    /// chunk; the cache is then checked against the store.
    /// A store failure aborts the pass; nothing is retried until the next one.
    pub async fn sweep_once(&self) -> AuthErrorResult<SweepReport> {
        let now = self.clock.now();
        let mut report = SweepReport::default();

        loop {
            let chunk = self
                .store
                .find_active_sessions_past_expiry(now, self.chunk_size)
                .await
                .map_err(store_unavailable)?;

            if chunk.is_empty() {
                break;
            }

            let ids: Vec<String> = chunk.iter().map(|session| session.id.clone()).collect();
            let marked = self
                .store
                .mark_sessions_expired(&ids)
                .await
                .map_err(store_unavailable)?;

            for id in &ids {
                self.session_cache.evict(id);
            }

            report.chunks += 1;
            report.expired += marked;

            if ids.len() < self.chunk_size as usize {
                break;
            }
            if marked == 0 {
                // The same rows would come back forever
                warn!("Sweep made no progress on a full chunk, stopping pass");
                break;
            }
        }

        report.evicted_stale = self.evict_retired_sessions().await?;

        let purged = self.session_cache.purge_expired()
            + self.revocations.purge_expired()
            + self.abuse.purge_expired();
        self.rate_limiter.retain_recent();

        self.metrics.sweep_completed(report.expired);
        self.metrics.cache_sizes(
            self.session_cache.len(),
            self.revocations.len(),
            self.abuse.len(),
        );
        debug!("Purged {} expired in-memory entries", purged);

        Ok(report)
    }

    /// Drop cached sessions that are EXPIRED or gone in the store, so a
    /// session retired outside this process stops authenticating within one
    /// sweep interval even while its cache entry is kept warm.
    async fn evict_retired_sessions(&self) -> AuthErrorResult<u64> {
        let cached = self.session_cache.session_ids();
        let mut evicted = 0;

        for chunk in cached.chunks(self.chunk_size as usize) {
            let active: HashSet<String> = self
                .store
                .find_active_session_ids(chunk)
                .await
                .map_err(store_unavailable)?
                .into_iter()
                .collect();

            for id in chunk.iter().filter(|id| !active.contains(*id)) {
                if self.session_cache.evict(id) {
                    debug!("Evicted session {} retired in the store", id);
                    evicted += 1;
                }
            }
        }

        Ok(evicted)
    }

    /// Run `sweep_once` every `interval` until shutdown is signalled.
    /// The first run happens one interval after start.
    pub fn spawn(self: Arc<Self>, interval: Duration, mut shutdown: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            info!("Session sweeper started (every {:?})", interval);

            loop {
                tokio::select! {
                    _ = shutdown.wait() => {
                        info!("Session sweeper stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.sweep_once().await {
                            Ok(report) if report.expired > 0 || report.evicted_stale > 0 => {
                                info!(
                                    "Session sweep expired {} sessions in {} chunks, evicted {} retired",
                                    report.expired, report.chunks, report.evicted_stale
                                );
                            }
                            Ok(_) => debug!("Session sweep found nothing to expire"),
                            Err(e) => {
                                self.metrics.sweep_failed();
                                error!("Session sweep failed: {}", e);
                            }
                        }
                    }
                }
            }
        })
    }
}

#[track_caller]
fn store_unavailable(e: warden_core::StoreError) -> AuthError {
    AuthError::StoreUnavailable {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
