//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → environment overrides (RELOAD_INTERVAL, POSTGRES_URI, ...)
//!     → validation.rs (semantic checks)
//!     → SyncConfig (validated, immutable)
//!     → handed to each component's constructor at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod duration;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DatabaseConfig;
pub use schema::LifecycleConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
pub use schema::ReconcileConfig;
pub use schema::SyncConfig;
