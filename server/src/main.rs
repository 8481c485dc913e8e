//! Keyset Server binary.

use keyset_server::config::Config;
use keyset_server::store::{self, HotkeySetStore, MemoryStore, PgStore};
use keyset_server::{build_router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyset_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Keyset Server on {}:{}", config.host, config.port);

    let store: Arc<dyn HotkeySetStore> = match &config.database_url {
        Some(database_url) => {
            let pool = store::create_pool(database_url, config.max_connections).await?;

            tracing::info!("Running database migrations...");
            store::run_migrations(&pool).await?;

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, hotkey sets are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(AppState::new(store));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
