//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM) before the loop starts
//! - Translate each signal into one shutdown phase step
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Failing to register a handler is a startup error
//! - First signal drains, second forces exit

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, ShutdownPhase};

/// Registered termination signal handlers.
pub struct SignalListener {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
}

impl SignalListener {
    /// Register the SIGINT and SIGTERM handlers.
    pub fn install() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
            })
        }

        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Wait for the next termination signal. `None` once no more signals
    /// can be delivered.
    pub async fn recv(&mut self) -> Option<&'static str> {
        #[cfg(unix)]
        {
            tokio::select! {
                received = self.interrupt.recv() => received.map(|_| "SIGINT"),
                received = self.terminate.recv() => received.map(|_| "SIGTERM"),
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok().map(|_| "ctrl-c")
        }
    }

    /// Advance `shutdown` once per received signal until ForceExit.
    pub fn spawn(mut self, shutdown: Shutdown) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(signal) = self.recv().await {
                match shutdown.trigger() {
                    ShutdownPhase::Draining => {
                        tracing::info!(signal, "Shutdown signal received, draining");
                    }
                    ShutdownPhase::ForceExit => {
                        tracing::warn!(signal, "Second shutdown signal received, forcing exit");
                        return;
                    }
                    ShutdownPhase::Running => {}
                }
            }
            tracing::error!("Signal stream closed, no further shutdown requests possible");
        })
    }
}
