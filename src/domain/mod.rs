//! Domain source subsystem.
//!
//! # Data Flow
//! ```text
//! application_domains table
//!     → postgres.rs (SELECT ... WHERE status = 'ACTIVATED' ORDER BY created_at, id)
//!     → model.rs (row → DomainRecord, unknown statuses dropped)
//!     → source.rs (DomainSource trait consumed by the reconciler)
//! ```
//!
//! # Design Decisions
//! - Read-only: nothing in this crate writes domain records
//! - Filtering happens server-side and again client-side
//! - Connectivity and query failures share one error family

pub mod model;
pub mod postgres;
pub mod source;

pub use model::{DomainRecord, DomainStatus};
pub use postgres::PgDomainSource;
pub use source::{DomainSource, DomainSourceError};
