// API Server Binary Entry Point
//
// Purpose: Load the crop catalog and serve it over Axum
// Usage: cargo run --features api --bin api_server

use crop_catalog::{create_router, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_catalog=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting crop catalog server...");

    let config = Config::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_SOURCE: {}", config.data_source);
    tracing::info!("  ASSET_ROOT: {}", config.asset_root.display());
    tracing::info!("  FETCH_TIMEOUT: {:?}", config.fetch_timeout);
    tracing::info!("  PORT: {}", config.port);

    // Fails fast when the catalog cannot be loaded
    let state = AppState::new(&config).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
