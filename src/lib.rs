//! Tiny - iterative HTTP/1.0 server for static files and CGI programs
//!
//! Core library for request dispatch.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
