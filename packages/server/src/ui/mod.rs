//! UI layer: HTTP routes, WebSocket connection handling and the relay
//! dispatcher that serializes channel events.

pub mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerError};
