//! # foodgram-gateway
//!
//! Real-time gateway for a recipe-sharing platform: a global chat channel,
//! a notification broadcast channel, and the shopping-list download
//! endpoint. The CRUD resource layer and the auth provider are external
//! collaborators reached through traits.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Sessions (ws/)
//!     │
//!     ├── ShoppingListService (service/)
//!     ├── ChannelLayer / GroupRegistry (domain/)
//!     │
//!     └── CartSource + AuthProvider (persistence/, external schema)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the full application router: REST endpoints, both WebSocket
/// channels, tracing and CORS layers.
///
/// Extracted from the binary so integration tests can run the exact same
/// router against an in-process listener.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws/chat", get(ws::handler::chat_handler))
        .route("/ws/notifications", get(ws::handler::notify_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
