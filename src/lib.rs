//! OTUServer - static file HTTP/1.1 server
//!
//! Serves files from a document root with GET and HEAD, keeping sockets open
//! on request. Every connection is multiplexed on a single thread.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
