//! WebSocket layer: upgrade handlers, wire frames, and the per-connection
//! session state machine.
//!
//! Two persistent endpoints: `/ws/chat` (global chat) and
//! `/ws/notifications` (notification broadcast).

pub mod handler;
pub mod messages;
pub mod session;
