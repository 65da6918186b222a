//! Reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! scheduler.rs (fixed interval, Idle → Ticking → Idle)
//!     → tick.rs
//!         → DomainSource::list_active_domains   (deadline)
//!         → BaseFragmentLoader::load
//!         → ConfigRenderer::render              (pure)
//!         → ProxyControl::apply                 (format, then push; deadline)
//!     → outcome.rs (TickOutcome: logged, counted, optionally forwarded)
//! ```
//!
//! # Design Decisions
//! - Stages run strictly in sequence; the first error aborts the tick
//! - A failed tick never stops the loop; the next interval is the retry
//! - One loop, one tick at a time: no overlap against the same proxy

pub mod outcome;
pub mod scheduler;
pub mod tick;

pub use outcome::{Stage, TickError, TickOutcome};
pub use scheduler::{RunSummary, Scheduler};
pub use tick::{Reconciler, TickTimeouts};
