//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::domain::ChannelLayer;
use crate::service::ShoppingListService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Broadcast channel layer used by all WebSocket sessions.
    pub channels: Arc<dyn ChannelLayer>,
    /// Shopping-list orchestration service.
    pub shopping_list: Arc<ShoppingListService>,
    /// Opaque-token validator.
    pub auth: Arc<dyn AuthProvider>,
}
