//! WebSocket session state machine.
//!
//! One [`Session`] drives one connection through
//! `Connecting -> Open -> Closed`. A single task owns the socket and the
//! member queue behind a `select!` loop, so inbound handling and outbound
//! delivery for the same connection never run concurrently. Group
//! membership is acquired on entry and released exactly once on every
//! exit path.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::messages::{ChatInbound, ChatOutbound, NOTIFY_ACK, NotifyInbound, NotifyOutbound};
use crate::domain::{ChannelLayer, ChatEvent, ConnectionId, GroupEvent, NotifyEvent};

/// Group name of the global chat channel.
pub const CHAT_GROUP: &str = "global_chat";

/// Group name of the notification channel.
pub const NOTIFY_GROUP: &str = "notifications";

/// Display name used until the client sets one.
pub const DEFAULT_DISPLAY_NAME: &str = "Аноним";

/// Lifecycle state of a session. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted by the transport, not yet joined to a group.
    Connecting,
    /// Joined; inbound frames are interpreted and routed.
    Open,
    /// Membership released; nothing further happens.
    Closed,
}

/// The two session flavors, differing in event vocabulary and group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlavor {
    /// Global chat: `set_name` / `message` frames.
    Chat,
    /// Notification broadcast: `message` frames only.
    Notify,
}

impl SessionFlavor {
    /// Returns the fixed group name for this flavor.
    #[must_use]
    pub const fn group(&self) -> &'static str {
        match self {
            Self::Chat => CHAT_GROUP,
            Self::Notify => NOTIFY_GROUP,
        }
    }
}

/// What a well-formed chat frame asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Adopt a new display name and announce it to the group.
    SetName(String),
    /// Broadcast a user message.
    Say(String),
}

/// A frame the session refuses to process.
///
/// Policy for violations: log at warn and ignore the frame; the
/// connection stays open and other group members are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// The frame is not a JSON object.
    #[error("frame is not a JSON object")]
    Undecodable,
    /// The frame carries none of the recognized fields.
    #[error("frame carries no recognized field")]
    UnrecognizedFrame,
}

/// Interprets an inbound chat frame.
///
/// Exactly one semantic per frame: `set_name` wins when both fields are
/// present.
///
/// # Errors
///
/// Returns a [`ProtocolViolation`] for undecodable frames or frames with
/// neither recognized field.
pub fn interpret_chat_frame(text: &str) -> Result<ChatAction, ProtocolViolation> {
    let frame: ChatInbound =
        serde_json::from_str(text).map_err(|_| ProtocolViolation::Undecodable)?;
    if let Some(name) = frame.set_name {
        return Ok(ChatAction::SetName(name));
    }
    if let Some(message) = frame.message {
        return Ok(ChatAction::Say(message));
    }
    Err(ProtocolViolation::UnrecognizedFrame)
}

/// Interprets an inbound notify frame.
///
/// # Errors
///
/// Returns [`ProtocolViolation::Undecodable`] when the frame is not a
/// JSON object with a `message` field.
pub fn interpret_notify_frame(text: &str) -> Result<String, ProtocolViolation> {
    let frame: NotifyInbound =
        serde_json::from_str(text).map_err(|_| ProtocolViolation::Undecodable)?;
    Ok(frame.message)
}

/// Per-connection state machine for one WebSocket.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    flavor: SessionFlavor,
    state: SessionState,
    display_name: String,
    channels: Arc<dyn ChannelLayer>,
}

impl Session {
    /// Creates a session in the `Connecting` state.
    #[must_use]
    pub fn new(flavor: SessionFlavor, channels: Arc<dyn ChannelLayer>) -> Self {
        Self {
            id: ConnectionId::new(),
            flavor,
            state: SessionState::Connecting,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            channels,
        }
    }

    /// Drives the connection until the transport closes or errors.
    ///
    /// Entry joins the flavor's group; the notify flavor additionally
    /// sends its private acknowledgment before any group traffic. Exit
    /// always releases group membership.
    pub async fn run(mut self, socket: WebSocket) {
        let (mut ws_tx, mut ws_rx) = socket.split();
        let (sink, mut events) = mpsc::unbounded_channel();

        self.channels.join(self.flavor.group(), self.id, sink).await;

        if self.flavor == SessionFlavor::Notify {
            let ack = NotifyOutbound {
                message: NOTIFY_ACK.to_string(),
            };
            let json = serde_json::to_string(&ack).unwrap_or_default();
            if ws_tx.send(Message::text(json)).await.is_err() {
                self.close().await;
                return;
            }
        }

        self.state = SessionState::Open;
        tracing::info!(id = %self.id, flavor = ?self.flavor, "session open");

        loop {
            tokio::select! {
                frame = ws_rx.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => self.handle_inbound(&text).await,
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Err(e)) => {
                            tracing::debug!(id = %self.id, error = %e, "socket error");
                            break;
                        }
                        // Ping/pong is answered by the protocol layer;
                        // binary frames are not part of the contract.
                        _ => {}
                    }
                }
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            let Some(json) = self.encode_outbound(&event) else {
                                continue;
                            };
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        self.close().await;
    }

    /// Releases group membership. Safe to call more than once; only the
    /// first call after `Connecting`/`Open` does anything.
    async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.channels.leave(self.flavor.group(), self.id).await;
        self.state = SessionState::Closed;
        tracing::info!(id = %self.id, flavor = ?self.flavor, "session closed");
    }

    /// Interprets one inbound text frame per the session flavor and
    /// publishes the resulting event, if any.
    async fn handle_inbound(&mut self, text: &str) {
        match self.flavor {
            SessionFlavor::Chat => match interpret_chat_frame(text) {
                Ok(ChatAction::SetName(name)) => {
                    self.display_name = name.clone();
                    // Broadcast, not a private ack; fires on every set.
                    let announcement = format!("{name} присоединился к чату");
                    self.channels
                        .publish(
                            CHAT_GROUP,
                            GroupEvent::Chat(ChatEvent::System { text: announcement }),
                        )
                        .await;
                }
                Ok(ChatAction::Say(message)) => {
                    self.channels
                        .publish(
                            CHAT_GROUP,
                            GroupEvent::Chat(ChatEvent::UserMessage {
                                author: self.display_name.clone(),
                                text: message,
                            }),
                        )
                        .await;
                }
                Err(violation) => {
                    tracing::warn!(id = %self.id, %violation, "ignoring malformed chat frame");
                }
            },
            SessionFlavor::Notify => match interpret_notify_frame(text) {
                Ok(message) => {
                    self.channels
                        .publish(NOTIFY_GROUP, GroupEvent::Notify(NotifyEvent { text: message }))
                        .await;
                }
                Err(violation) => {
                    tracing::warn!(id = %self.id, %violation, "ignoring malformed notify frame");
                }
            },
        }
    }

    /// Re-encodes a delivered event per the flavor's wire shape.
    fn encode_outbound(&self, event: &GroupEvent) -> Option<String> {
        match (self.flavor, event) {
            (SessionFlavor::Chat, GroupEvent::Chat(chat)) => {
                serde_json::to_string(&ChatOutbound::from(chat)).ok()
            }
            (SessionFlavor::Notify, GroupEvent::Notify(notify)) => {
                serde_json::to_string(&NotifyOutbound::from(notify)).ok()
            }
            // Groups are namespaced per flavor, so a mismatch means a
            // publisher used the wrong group name. Drop it.
            _ => {
                tracing::debug!(id = %self.id, kind = event.kind(), "dropping cross-flavor event");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::GroupRegistry;

    #[test]
    fn set_name_frame_is_interpreted() {
        let action = interpret_chat_frame(r#"{"set_name":"X"}"#);
        assert_eq!(action.ok(), Some(ChatAction::SetName("X".to_string())));
    }

    #[test]
    fn message_frame_is_interpreted() {
        let action = interpret_chat_frame(r#"{"message":"hi"}"#);
        assert_eq!(action.ok(), Some(ChatAction::Say("hi".to_string())));
    }

    #[test]
    fn set_name_wins_when_both_fields_present() {
        let action = interpret_chat_frame(r#"{"set_name":"X","message":"hi"}"#);
        assert_eq!(action.ok(), Some(ChatAction::SetName("X".to_string())));
    }

    #[test]
    fn empty_object_is_a_violation() {
        let action = interpret_chat_frame("{}");
        assert_eq!(action.err(), Some(ProtocolViolation::UnrecognizedFrame));
    }

    #[test]
    fn non_json_is_a_violation() {
        let action = interpret_chat_frame("not json");
        assert_eq!(action.err(), Some(ProtocolViolation::Undecodable));
    }

    #[test]
    fn notify_frame_is_interpreted() {
        let message = interpret_notify_frame(r#"{"message":"ping"}"#);
        assert_eq!(message.ok(), Some("ping".to_string()));
    }

    #[test]
    fn notify_without_message_is_a_violation() {
        let message = interpret_notify_frame(r#"{"other":1}"#);
        assert_eq!(message.err(), Some(ProtocolViolation::Undecodable));
    }

    #[test]
    fn flavors_map_to_fixed_groups() {
        assert_eq!(SessionFlavor::Chat.group(), "global_chat");
        assert_eq!(SessionFlavor::Notify.group(), "notifications");
    }

    #[tokio::test]
    async fn name_change_applies_to_subsequent_messages_only() {
        let channels: Arc<dyn ChannelLayer> = Arc::new(GroupRegistry::new());
        let mut session = Session::new(SessionFlavor::Chat, Arc::clone(&channels));

        // Observe the group from the outside.
        let (tx, mut rx) = mpsc::unbounded_channel();
        channels.join(CHAT_GROUP, ConnectionId::new(), tx).await;

        session.handle_inbound(r#"{"message":"before"}"#).await;
        session.handle_inbound(r#"{"set_name":"X"}"#).await;
        session.handle_inbound(r#"{"message":"after"}"#).await;

        assert_eq!(
            rx.recv().await,
            Some(GroupEvent::Chat(ChatEvent::UserMessage {
                author: "Аноним".to_string(),
                text: "before".to_string(),
            }))
        );
        assert_eq!(
            rx.recv().await,
            Some(GroupEvent::Chat(ChatEvent::System {
                text: "X присоединился к чату".to_string(),
            }))
        );
        assert_eq!(
            rx.recv().await,
            Some(GroupEvent::Chat(ChatEvent::UserMessage {
                author: "X".to_string(),
                text: "after".to_string(),
            }))
        );
    }

    #[tokio::test]
    async fn malformed_frame_publishes_nothing() {
        let channels: Arc<dyn ChannelLayer> = Arc::new(GroupRegistry::new());
        let mut session = Session::new(SessionFlavor::Chat, Arc::clone(&channels));

        let (tx, mut rx) = mpsc::unbounded_channel();
        channels.join(CHAT_GROUP, ConnectionId::new(), tx).await;

        session.handle_inbound("garbage").await;
        session.handle_inbound("{}").await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let channels: Arc<dyn ChannelLayer> = Arc::new(GroupRegistry::new());
        let mut session = Session::new(SessionFlavor::Chat, Arc::clone(&channels));

        let (sink, _events) = mpsc::unbounded_channel();
        channels.join(CHAT_GROUP, session.id, sink).await;
        session.state = SessionState::Open;

        session.close().await;
        assert_eq!(session.state, SessionState::Closed);
        assert_eq!(channels.member_count(CHAT_GROUP).await, 0);

        // Second close must not panic or touch the registry.
        session.close().await;
        assert_eq!(session.state, SessionState::Closed);
    }
}
