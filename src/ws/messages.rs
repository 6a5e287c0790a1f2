//! Wire frames for the two WebSocket endpoints.
//!
//! Both endpoints speak one JSON object per text frame. The chat channel
//! marks system announcements with `is_system` so clients can style them
//! differently from user messages.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatEvent, NotifyEvent};

/// Private acknowledgment sent to a notify client right after accept.
pub const NOTIFY_ACK: &str = "subscribed to notifications";

/// Inbound chat frame: `{"set_name": s}` or `{"message": m}`.
///
/// Both fields are optional at the decode level; frame semantics are
/// resolved by the session (exactly one semantic per frame, `set_name`
/// wins if both are present).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatInbound {
    /// New display name for the session.
    #[serde(default)]
    pub set_name: Option<String>,
    /// Chat message text.
    #[serde(default)]
    pub message: Option<String>,
}

/// Outbound chat frame.
///
/// System: `{"message": m, "is_system": true}`.
/// User: `{"message": m, "user_name": u, "is_system": false}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutbound {
    /// Message text.
    pub message: String,
    /// Author display name; absent on system frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Whether this is a server-originated announcement.
    pub is_system: bool,
}

impl From<&ChatEvent> for ChatOutbound {
    fn from(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::System { text } => Self {
                message: text.clone(),
                user_name: None,
                is_system: true,
            },
            ChatEvent::UserMessage { author, text } => Self {
                message: text.clone(),
                user_name: Some(author.clone()),
                is_system: false,
            },
        }
    }
}

/// Inbound notify frame: `{"message": m}`. A missing field is a decode
/// error and is handled as a protocol violation.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyInbound {
    /// Notification text.
    pub message: String,
}

/// Outbound notify frame: `{"message": m}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyOutbound {
    /// Notification text.
    pub message: String,
}

impl From<&NotifyEvent> for NotifyOutbound {
    fn from(event: &NotifyEvent) -> Self {
        Self {
            message: event.text.clone(),
        }
    }
}
