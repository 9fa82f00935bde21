use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Receiving end of a `ShutdownCoordinator`, held by the sweeper task
pub struct ShutdownGuard {
    stop_rx: broadcast::Receiver<()>,
    stopped: Arc<AtomicBool>,
}

impl ShutdownGuard {
    pub(crate) fn new(stop_rx: broadcast::Receiver<()>, stopped: Arc<AtomicBool>) -> Self {
        Self { stop_rx, stopped }
    }

    /// Resolves once shutdown is signalled, including a signal sent before
    /// this guard was taken.
    pub async fn wait(&mut self) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.stop_rx.recv().await;
    }
}
