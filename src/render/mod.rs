//! Configuration rendering subsystem.
//!
//! # Data Flow
//! ```text
//! base.rs (static Caddyfile fragment, read each tick)
//!     + DomainRecord list (query order)
//!     → template.rs (site block with named placeholders)
//!     → renderer.rs (base ++ block_1 ++ ... ++ block_n)
//! ```
//!
//! # Design Decisions
//! - Rendering is pure: no I/O, identical inputs give identical output
//! - The base fragment always comes first, blocks follow input order
//! - No domains means the document is exactly the base fragment

pub mod base;
pub mod renderer;
pub mod template;

pub use base::{BaseFragmentError, BaseFragmentLoader};
pub use renderer::{render, ConfigRenderer, RenderGlobals};
pub use template::TemplateError;
