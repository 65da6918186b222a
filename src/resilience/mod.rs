//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Store query / proxy push:
//!     → timeouts.rs (enforce per-call deadline)
//!     → On expiry: stage error, tick aborted, next interval retries
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No in-tick retries and no backoff: the fixed interval is the retry policy

pub mod timeouts;

pub use timeouts::with_deadline;
