//! Axum WebSocket upgrade handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::session::{Session, SessionFlavor};
use crate::app_state::AppState;

/// `GET /ws/chat` — Upgrade to the global chat channel.
pub async fn chat_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let channels = Arc::clone(&state.channels);
    ws.on_upgrade(move |socket| Session::new(SessionFlavor::Chat, channels).run(socket))
}

/// `GET /ws/notifications` — Upgrade to the notification channel.
pub async fn notify_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let channels = Arc::clone(&state.channels);
    ws.on_upgrade(move |socket| Session::new(SessionFlavor::Notify, channels).run(socket))
}
