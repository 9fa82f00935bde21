use crate::{AuthMetrics, Clock};

use warden_core::{SecurityAction, SecurityEvent, SessionStore};

use std::sync::Arc;

use log::warn;

/// Appends audit events through the store. A failed write is logged and
/// swallowed: the audit trail never decides an authentication outcome.
#[derive(Clone)]
pub struct SecurityEventRecorder {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    metrics: AuthMetrics,
}

impl SecurityEventRecorder {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, metrics: AuthMetrics) -> Self {
        Self {
            store,
            clock,
            metrics,
        }
    }

    pub async fn record(
        &self,
        action: SecurityAction,
        user_id: Option<&str>,
        ip_address: &str,
        user_agent: Option<&str>,
    ) {
        let event = SecurityEvent::new(
            action,
            user_id.map(str::to_string),
            ip_address.to_string(),
            user_agent.map(str::to_string),
            self.clock.now(),
        );

        if let Err(e) = self.store.append_security_event(&event).await {
            self.metrics.security_event_write_failed();
            warn!(
                "Failed to record security event {} for {}: {}",
                action,
                user_id.unwrap_or("<unknown>"),
                e
            );
        }
    }
}
