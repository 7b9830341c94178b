//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the file server speaks: GET and HEAD,
//! with keep-alive on request.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: Per-socket state machine: buffering, dispatch, keep-alive
//! - **`parser`**: Finds the header terminator and parses the header block
//! - **`request`**: HTTP request representation
//! - **`response`**: Status codes and responses, with a builder
//! - **`writer`**: Serializes responses and writes them to the client
//! - **`mime`**: Content-Type lookup by file extension
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingHeaders  │ ← Buffer bytes until "\r\n\r\n"
//!        └──────┬───────────┘
//!               │ Header block complete
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Resolve, read file, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │     Writing      │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Connection: keep-alive → Idle → AwaitingHeaders
//!               └─ otherwise → Closing
//! ```
//!
//! Malformed or oversized header blocks, peer EOF and idle timeouts all
//! lead straight from `AwaitingHeaders` to `Closing` without a response.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use otuserver::files::DocumentRoot;
//! use otuserver::http::connection::{Connection, ConnectionLimits};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let root = Arc::new(DocumentRoot::new("./public")?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let root = Arc::clone(&root);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, root, ConnectionLimits::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
