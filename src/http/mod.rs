//! HTTP/1.0 protocol implementation.
//!
//! Every accepted connection carries exactly one request. There is no
//! keep-alive, and only GET is implemented.
//!
//! # Architecture
//!
//! - **`reader`**: Buffered line reader over the connection
//! - **`parser`**: Request line parsing and header consumption
//! - **`request`**: Request line representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content type detection based on file suffixes
//! - **`error`**: Protocol failures and the error page sent for them
//! - **`connection`**: The per-connection transaction state machine
//!
//! # Transaction State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Request line, method check, headers
//!        └──────┬──────┘
//!               │ GET request
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Classify, stat, validate, serve
//!        └──────┬───────────┘
//!               │ protocol failure (from either state)
//!               ▼
//!        ┌──────────────────┐
//!        │     Failed       │ ← Send error page
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tiny::config::ContentConfig;
//! use tiny::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, "Tiny Web Server", ContentConfig::default());
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
