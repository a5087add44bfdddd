//! Terminal client for the Irori relay.
//!
//! Joins the chat under a display name, prints what the relay broadcasts and
//! sends each input line as a chat message. Files are uploaded over HTTP and
//! then announced on the channel.

pub mod command;
pub mod endpoint;
pub mod error;
pub mod formatter;
mod session;
mod ui;
pub mod upload;

pub use session::{ClientOptions, run_client};
