//! Listening socket and the accept loop.

pub mod listener;
