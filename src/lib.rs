//! Caddy route reconciler library.
//!
//! Keeps a Caddy instance's routing in sync with the `ACTIVATED` rows of the
//! `application_domains` table.

pub mod config;
pub mod domain;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod reconcile;
pub mod render;
pub mod resilience;

pub use config::schema::SyncConfig;
pub use lifecycle::Shutdown;
pub use reconcile::{Reconciler, Scheduler};
