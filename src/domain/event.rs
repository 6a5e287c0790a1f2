//! Domain events carried between connections through the channel layer.
//!
//! A session produces a [`GroupEvent`] for its group; every member of that
//! group (including the producer) receives a clone and re-encodes it for
//! its own client.

/// Event vocabulary of the chat channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Server-originated announcement, rendered distinctly by clients.
    System {
        /// Announcement text.
        text: String,
    },
    /// Message authored by a participant.
    UserMessage {
        /// Display name of the author at the time of sending.
        author: String,
        /// Message text.
        text: String,
    },
}

/// Event vocabulary of the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyEvent {
    /// Notification text.
    pub text: String,
}

/// The single payload type fanned out by the channel layer.
///
/// Chat and notification groups live in separate namespaces, so a given
/// group only ever carries one variant in practice; the union keeps the
/// registry monomorphic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEvent {
    /// Event on a chat group.
    Chat(ChatEvent),
    /// Event on a notification group.
    Notify(NotifyEvent),
}

impl GroupEvent {
    /// Returns the event kind as a static string slice, for log context.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Chat(ChatEvent::System { .. }) => "chat_system",
            Self::Chat(ChatEvent::UserMessage { .. }) => "chat_message",
            Self::Notify(_) => "notify_message",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn kind_discriminates_variants() {
        let system = GroupEvent::Chat(ChatEvent::System {
            text: "joined".to_string(),
        });
        assert_eq!(system.kind(), "chat_system");

        let user = GroupEvent::Chat(ChatEvent::UserMessage {
            author: "alice".to_string(),
            text: "hi".to_string(),
        });
        assert_eq!(user.kind(), "chat_message");

        let notify = GroupEvent::Notify(NotifyEvent {
            text: "ping".to_string(),
        });
        assert_eq!(notify.kind(), "notify_message");
    }
}
