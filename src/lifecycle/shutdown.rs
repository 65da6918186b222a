//! Shutdown coordination.
//!
//! # Phases
//! ```text
//! Running → Draining → ForceExit
//! ```
//! Every termination request advances the phase by one. Draining stops new
//! ticks; ForceExit abandons whatever is still running.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShutdownPhase {
    Running,
    Draining,
    ForceExit,
}

impl ShutdownPhase {
    fn next(self) -> Self {
        match self {
            ShutdownPhase::Running => ShutdownPhase::Draining,
            ShutdownPhase::Draining | ShutdownPhase::ForceExit => ShutdownPhase::ForceExit,
        }
    }
}

/// Coordinator for graceful shutdown.
///
/// Cloneable handle; every long-running task takes a [`ShutdownListener`].
#[derive(Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<ShutdownPhase>>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ShutdownPhase::Running);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Advance to the next phase and return it.
    pub fn trigger(&self) -> ShutdownPhase {
        let mut phase = ShutdownPhase::Running;
        self.tx.send_modify(|current| {
            *current = current.next();
            phase = *current;
        });
        phase
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`Shutdown`].
#[derive(Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<ShutdownPhase>,
}

impl ShutdownListener {
    pub fn phase(&self) -> ShutdownPhase {
        *self.rx.borrow()
    }

    /// Resolves once the phase is at least `phase`.
    ///
    /// If the coordinator is dropped this resolves as well; nobody is left
    /// to keep the process running.
    pub async fn reached(&mut self, phase: ShutdownPhase) {
        let _ = self.rx.wait_for(|current| *current >= phase).await;
    }

    pub async fn draining(&mut self) {
        self.reached(ShutdownPhase::Draining).await
    }

    pub async fn force_exit(&mut self) {
        self.reached(ShutdownPhase::ForceExit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_phase_sequence() {
        let shutdown = Shutdown::new();
        assert_eq!(shutdown.phase(), ShutdownPhase::Running);
        assert_eq!(shutdown.trigger(), ShutdownPhase::Draining);
        assert_eq!(shutdown.trigger(), ShutdownPhase::ForceExit);
        assert_eq!(shutdown.trigger(), ShutdownPhase::ForceExit);
    }

    #[tokio::test]
    async fn test_listener_wakes_on_draining() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();

        let waiter = tokio::spawn(async move {
            listener.draining().await;
            listener.phase()
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.trigger();

        let phase = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(phase, ShutdownPhase::Draining);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_phase() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();

        let mut listener = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), listener.force_exit())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropped_coordinator_releases_listeners() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), listener.draining())
            .await
            .unwrap();
    }
}
