//! Message formatting utilities for client display.

use irori_server::infrastructure::dto::websocket::{ServerEvent, UsersDto};
use irori_shared::time::timestamp_to_local_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any event received from the relay
    ///
    /// # Arguments
    ///
    /// * `event` - The decoded event
    /// * `me` - This client's display name (to mark as "me")
    /// * `received_at` - Unix timestamp of arrival (milliseconds)
    /// * `file_base` - Prefix for download links of shared files
    pub fn format_event(
        event: &ServerEvent,
        me: &str,
        received_at: i64,
        file_base: &str,
    ) -> String {
        let at = timestamp_to_local_clock(received_at);
        match event {
            ServerEvent::JoinChat(data) => Self::format_joined(&data.name, &data.users, me, &at),
            ServerEvent::LeaveChat(data) => {
                Self::format_left(data.name.as_deref(), &data.users, &at)
            }
            ServerEvent::ChatMessage(data) => Self::format_chat_message(
                &data.user,
                &data.message,
                data.color.as_deref(),
                &at,
            ),
            ServerEvent::FileUpload(data) => {
                format!(
                    "\n[{}] {} shared a file: {}{}\n",
                    at, data.user, file_base, data.file_name
                )
            }
            ServerEvent::IncomingCall(data) => format!(
                "\n[{}] {} is starting a video call (open the browser client to answer)\n",
                at, data.user
            ),
            ServerEvent::CallAccepted(data) => {
                format!("\n[{}] {} accepted a video call\n", at, data.user)
            }
            ServerEvent::Error(data) => format!("\n! {} ({})\n", data.message, data.kind),
        }
    }

    /// Format a join notification with the full participant list
    pub fn format_joined(name: &str, users: &UsersDto, me: &str, at: &str) -> String {
        let mut output = format!("\n[{}] + {} joined\n", at, name);
        output.push_str(&Self::format_users(users, me));
        output
    }

    /// Format a leave notification. `name` is `None` for a connection that
    /// never joined.
    pub fn format_left(name: Option<&str>, users: &UsersDto, at: &str) -> String {
        match name {
            Some(name) => format!("\n[{}] - {} left ({} online)\n", at, name, users.len()),
            None => format!("\n[{}] - a guest disconnected ({} online)\n", at, users.len()),
        }
    }

    /// Format a chat message
    pub fn format_chat_message(user: &str, message: &str, color: Option<&str>, at: &str) -> String {
        match color {
            Some(color) => format!("\n[{}] @{} ({}): {}\n", at, user, color, message),
            None => format!("\n[{}] @{}: {}\n", at, user, message),
        }
    }

    /// Format the participant list, sorted by name
    pub fn format_users(users: &UsersDto, me: &str) -> String {
        let mut names: Vec<&str> = users.values().map(String::as_str).collect();
        names.sort_unstable();

        let mut output = String::from("Online: ");
        let listed: Vec<String> = names
            .into_iter()
            .map(|name| {
                if name == me {
                    format!("{} (me)", name)
                } else {
                    name.to_string()
                }
            })
            .collect();
        output.push_str(&listed.join(", "));
        output.push('\n');
        output
    }

    /// Format a frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }
}
