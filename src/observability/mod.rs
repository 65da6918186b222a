//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler produces one TickOutcome per tick:
//!     → TickOutcome::log (structured log event)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Operators see failures only through logs and metrics
//! - Structured fields (tick, stage, error) for machine parsing

pub mod logging;
pub mod metrics;
