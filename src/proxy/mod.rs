//! Proxy control subsystem.
//!
//! # Data Flow
//! ```text
//! rendered document
//!     → caddyfile.rs (canonical formatting, rejects unbalanced input)
//!     → client.rs (POST <admin_url>/load, Content-Type: text/caddyfile)
//!     → ApplyReport (status + body) or ApplyError
//! ```

pub mod caddyfile;
pub mod client;

pub use caddyfile::FormatError;
pub use client::{AdminClient, ApplyError, ApplyReport, ProxyControl};
