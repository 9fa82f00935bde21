use crate::ShutdownGuard;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// One-shot stop signal shared by the gate and its background sweeper.
///
/// Once stopped it stays stopped: guards taken afterwards resolve immediately,
/// so a sweeper started after shutdown exits on its first poll.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stop_tx: broadcast::Sender<()>,
    stopped: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stop_tx, _) = broadcast::channel(1);
        Self {
            stop_tx,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signal every guard. Returns false if shutdown had already been signalled.
    pub fn shutdown(&self) -> bool {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return false;
        }
        log::info!("Stopping session sweeper");
        let _ = self.stop_tx.send(());
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.stop_tx.subscribe(), self.stopped.clone())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
