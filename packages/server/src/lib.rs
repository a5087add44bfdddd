//! Chat room relay with file sharing and WebRTC call signaling.
//!
//! The server tracks connected users in a single in-memory presence map and
//! forwards chat messages, file notices and opaque session descriptions to
//! the right peers over one WebSocket connection per client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
