//! Resolution and delivery of requested resources.
//!
//! Targets are classified as static files or dynamic programs, checked
//! against the filesystem and then served by the matching responder.

pub mod cgi;
pub mod resource;
pub mod static_files;
pub mod target;

pub use target::{ResolvedTarget, resolve};
