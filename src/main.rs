//! foodgram-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints and both
//! WebSocket channels.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use foodgram_gateway::app_router;
use foodgram_gateway::app_state::AppState;
use foodgram_gateway::config::GatewayConfig;
use foodgram_gateway::domain::{ChannelLayer, GroupRegistry};
use foodgram_gateway::persistence::{PostgresAuthProvider, PostgresCartSource};
use foodgram_gateway::service::ShoppingListService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting foodgram-gateway");

    // Single process-wide registry, constructed once at startup.
    let channels: Arc<dyn ChannelLayer> = Arc::new(GroupRegistry::new());

    // External CRUD collaborator's database; lazy so the gateway comes up
    // even while the database is still starting.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect_lazy(&config.database_url)?;

    let cart_source = Arc::new(PostgresCartSource::new(pool.clone()));
    let auth = Arc::new(PostgresAuthProvider::new(pool));
    let shopping_list = Arc::new(ShoppingListService::new(cart_source));

    // Build application state and router
    let state = AppState {
        channels,
        shopping_list,
        auth,
    };
    let app = app_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
