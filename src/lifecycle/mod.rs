//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build store, renderer, admin client → Scheduler
//!
//! Controller (controller.rs):
//!     Spawn scheduler → wait for Draining → wait for scheduler (grace) → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Running → Draining
//!     SIGTERM/SIGINT again → ForceExit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then collaborators, then the loop
//! - Draining stops new ticks; the in-flight tick may finish
//! - Shutdown has timeout: abandoned after the grace period

pub mod controller;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use controller::Exit;
pub use shutdown::{Shutdown, ShutdownListener, ShutdownPhase};
